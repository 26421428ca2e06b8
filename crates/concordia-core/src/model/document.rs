use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::ids::DocumentId;

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_LEN: usize = 500;

/// Lowercased, trimmed form of a title, used only for the corpus-wide
/// uniqueness check.
#[must_use]
pub fn normalize_title(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A persisted text record with its embedding vector.
///
/// Owned exclusively by the corpus store; the rest of the system holds
/// transient copies for the duration of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,

    /// Display title (non-empty, at most [`MAX_TITLE_LEN`] characters).
    pub title: String,

    /// Full body text the embedding was computed from.
    pub body: String,

    /// Embedding vector, absent for records written before a model was
    /// available. Records without a vector are never ranked.
    pub embedding: Option<Vec<f32>>,

    /// Reference to the source image this record was extracted from,
    /// if it came through the image ingest path.
    pub source_image_ref: Option<String>,

    /// Whitespace-separated word count of the body.
    pub word_count: u32,

    /// Character count of the body.
    pub character_count: u32,

    pub created_at: DateTime<Utc>,

    /// Set on the first edit, absent for never-edited records.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Document {
    /// The normalized form of this document's title.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }
}

/// Validated input for an insert or update; the store assigns the id
/// and timestamps.
///
/// The embedding is attached after validation, so callers can reject bad
/// input before paying for a provider round-trip. An empty embedding is
/// stored as NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDraft {
    pub title: String,
    pub body: String,
    pub embedding: Vec<f32>,
    pub source_image_ref: Option<String>,
}

impl DocumentDraft {
    /// Build a draft, validating the title and body.
    ///
    /// # Errors
    /// Returns [`Error::InvalidData`] when the trimmed title is empty or
    /// longer than [`MAX_TITLE_LEN`] characters, or the trimmed body is
    /// empty.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Result<Self> {
        let title = title.into().trim().to_string();
        let body = body.into().trim().to_string();

        if title.is_empty() {
            return Err(Error::InvalidData("title must not be empty".to_string()));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(Error::InvalidData(format!(
                "title exceeds {MAX_TITLE_LEN} characters"
            )));
        }
        if body.is_empty() {
            return Err(Error::InvalidData("body must not be empty".to_string()));
        }

        Ok(Self {
            title,
            body,
            embedding: Vec::new(),
            source_image_ref: None,
        })
    }

    #[must_use]
    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = embedding;
        self
    }

    #[must_use]
    pub fn with_source_image(mut self, reference: impl Into<String>) -> Self {
        self.source_image_ref = Some(reference.into());
        self
    }

    /// Normalized form of the draft title.
    #[must_use]
    pub fn normalized_title(&self) -> String {
        normalize_title(&self.title)
    }

    /// Whitespace-separated word count of the body.
    #[must_use]
    pub fn word_count(&self) -> u32 {
        self.body.split_whitespace().count() as u32
    }

    /// Character count of the body.
    #[must_use]
    pub fn character_count(&self) -> u32 {
        self.body.chars().count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title_folds_case_and_whitespace() {
        assert_eq!(normalize_title("  SALMO 23  "), "salmo 23");
        assert_eq!(normalize_title("Salmo 23"), "salmo 23");
    }

    #[test]
    fn test_draft_trims_and_counts() {
        let draft = DocumentDraft::new("  Salmo 23  ", "  O Senhor é o meu pastor  ").unwrap();
        assert_eq!(draft.title, "Salmo 23");
        assert_eq!(draft.normalized_title(), "salmo 23");
        assert_eq!(draft.word_count(), 6);
        assert_eq!(draft.character_count(), 23);
    }

    #[test]
    fn test_draft_rejects_empty_title() {
        let err = DocumentDraft::new("   ", "body").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_draft_rejects_oversized_title() {
        let long = "a".repeat(MAX_TITLE_LEN + 1);
        let err = DocumentDraft::new(long, "body").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_draft_rejects_empty_body() {
        let err = DocumentDraft::new("title", "  ").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }
}
