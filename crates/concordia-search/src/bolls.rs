//! Scripture lookup client.
//!
//! Resolves a parsed [`Citation`] to canonical verse text via a
//! bolls.life-style API. Any failure (transport, non-200, missing text)
//! reads as "verse not found"; the caller decides how to report it.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use concordia_core::canon::Citation;

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Scripture lookup provider client.
#[derive(Debug, Clone)]
pub struct BibleClient {
    http: Client,
    base_url: String,
    translation: String,
}

#[derive(Debug, Deserialize)]
struct VerseResponse {
    text: Option<String>,
}

/// A resolved verse: canonical reference plus its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    /// Canonical display form, e.g. "Lucas 2:15".
    pub reference: String,
    pub text: String,
}

impl BibleClient {
    /// Create a new scripture lookup client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .user_agent("concordia/0.1.0 (https://github.com/oxur/concordia)")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            translation: translation.into(),
        })
    }

    fn verse_url(&self, citation: &Citation) -> String {
        format!(
            "{}/verse/{}/{}/{}/{}",
            self.base_url,
            self.translation,
            citation.book.number(),
            citation.chapter,
            citation.verse
        )
    }

    /// Fetch the text of a verse. `None` when the provider cannot
    /// supply it, whatever the reason.
    pub async fn get_verse(&self, citation: &Citation) -> Option<Verse> {
        let url = self.verse_url(citation);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Scripture lookup failed for {citation}: {err}");
                return None;
            }
        };

        if !response.status().is_success() {
            log::error!(
                "Scripture API error {} for {citation}",
                response.status()
            );
            return None;
        }

        let parsed: VerseResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                log::error!("Invalid scripture response for {citation}: {err}");
                return None;
            }
        };

        let text = parsed.text?.trim().to_string();
        if text.is_empty() {
            log::error!("Empty verse text for {citation}");
            return None;
        }

        Some(Verse {
            reference: citation.reference(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concordia_core::canon;

    #[test]
    fn test_client_creation() {
        let client = BibleClient::new("https://bolls.life", "ARA");
        assert!(client.is_ok());
    }

    #[test]
    fn test_verse_url_uses_book_number() {
        let client = BibleClient::new("https://bolls.life", "ARA").unwrap();
        let citation = canon::parse("Lucas 2,15").unwrap();
        assert_eq!(
            client.verse_url(&citation),
            "https://bolls.life/verse/ARA/42/2/15"
        );
    }
}
