//! Ollama embedding client.
//!
//! Turns arbitrary text into a fixed-length vector by calling an
//! Ollama-compatible provider. Transport failures are retried with an
//! escalating-timeout policy: the first attempt waits long enough for a
//! cold model to load, later attempts use a shorter timeout. A 200
//! response without a usable vector is a protocol error and is never
//! retried.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{SearchError, SearchResult};

/// Default extra attempts after the first.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// First-attempt timeout; the model may still be loading.
const COLD_START_TIMEOUT: Duration = Duration::from_secs(120);

/// Timeout for every attempt after the first.
const RETRY_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the model-registry availability probe.
const TAGS_TIMEOUT: Duration = Duration::from_secs(5);

/// Embedding provider client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
    name: String,
}

/// Classified outcome of a single embedding attempt.
#[derive(Debug)]
enum Attempt {
    Success(Vec<f32>),
    /// Transport-level failure; eligible for another attempt.
    Retryable(String),
    /// Protocol violation; retrying cannot help.
    Fatal(SearchError),
}

/// Timeout for a given attempt number (0-based).
const fn attempt_timeout(attempt: u32) -> Duration {
    if attempt == 0 {
        COLD_START_TIMEOUT
    } else {
        RETRY_TIMEOUT
    }
}

/// Whether another attempt is allowed after `attempt` (0-based) failed.
const fn should_retry(attempt: u32, max_retries: u32) -> bool {
    attempt < max_retries
}

/// Classify a provider response body for one attempt.
fn classify_response(status: StatusCode, body: &str) -> Attempt {
    if !status.is_success() {
        return Attempt::Retryable(format!("HTTP {status}: {}", truncate(body, 200)));
    }

    match serde_json::from_str::<EmbeddingResponse>(body) {
        Ok(response) if !response.embedding.is_empty() => Attempt::Success(response.embedding),
        Ok(_) => Attempt::Fatal(SearchError::MalformedResponse {
            message: "response contained an empty embedding vector".to_string(),
        }),
        Err(err) => Attempt::Fatal(SearchError::MalformedResponse {
            message: format!("no embedding field in 200 response: {err}"),
        }),
    }
}

impl OllamaClient {
    /// Create a new embedding client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent("concordia/0.1.0 (https://github.com/oxur/concordia)")
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// The configured model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate an embedding for the given text.
    ///
    /// Empty or all-whitespace input is rejected before any network
    /// call. The trimmed text is sent whole; on transport failure the
    /// call is retried up to `max_retries` additional times with no
    /// backoff beyond the timeout itself.
    ///
    /// # Errors
    /// [`SearchError::EmptyInput`] for blank input,
    /// [`SearchError::MalformedResponse`] for a 200 without a usable
    /// vector, [`SearchError::EmbeddingUnavailable`] once the retry
    /// budget is exhausted.
    pub async fn embed(&self, text: &str, max_retries: u32) -> SearchResult<Vec<f32>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyInput);
        }

        let mut attempt = 0;
        loop {
            match self.request_embedding(trimmed, attempt_timeout(attempt)).await {
                Attempt::Success(vector) => {
                    if attempt > 0 {
                        log::info!("Embedding succeeded on attempt {}", attempt + 1);
                    }
                    log::debug!(
                        "Generated {}-dimensional embedding for text: {}...",
                        vector.len(),
                        truncate(trimmed, 50)
                    );
                    return Ok(vector);
                }
                Attempt::Fatal(err) => return Err(err),
                Attempt::Retryable(cause) => {
                    log::warn!("Embedding attempt {} failed: {cause}", attempt + 1);
                    if !should_retry(attempt, max_retries) {
                        return Err(SearchError::EmbeddingUnavailable {
                            attempts: attempt + 1,
                            cause,
                        });
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn request_embedding(&self, prompt: &str, timeout: Duration) -> Attempt {
        let payload = EmbeddingRequest {
            model: &self.model,
            prompt,
        };

        let response = self
            .http
            .post(format!("{}/api/embeddings", self.base_url))
            .json(&payload)
            .timeout(timeout)
            .send()
            .await;

        match response {
            Err(err) => Attempt::Retryable(err.to_string()),
            Ok(response) => {
                let status = response.status();
                match response.text().await {
                    Err(err) => Attempt::Retryable(err.to_string()),
                    Ok(body) => classify_response(status, &body),
                }
            }
        }
    }

    /// Check whether the configured model appears in the provider's
    /// model registry (substring match).
    ///
    /// Network failure or absence both yield `false`; nothing is ever
    /// raised from here.
    pub async fn check_availability(&self) -> bool {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(TAGS_TIMEOUT)
            .send()
            .await;

        let tags: TagsResponse = match response {
            Ok(response) if response.status().is_success() => {
                match response.json().await {
                    Ok(tags) => tags,
                    Err(err) => {
                        log::error!("Failed to parse model registry: {err}");
                        return false;
                    }
                }
            }
            Ok(response) => {
                log::error!("Model registry returned HTTP {}", response.status());
                return false;
            }
            Err(err) => {
                log::error!("Failed to reach model registry: {err}");
                return false;
            }
        };

        let available = tags
            .models
            .iter()
            .any(|tag| tag.name.contains(&self.model));

        if !available {
            let names: Vec<&str> = tags.models.iter().map(|tag| tag.name.as_str()).collect();
            log::warn!(
                "Model {} not found. Available models: {names:?}",
                self.model
            );
            log::warn!("Please run: ollama pull {}", self.model);
        }

        available
    }

    /// Best-effort single embed call to pull the model into memory and
    /// cut first-request latency. Failure is logged and swallowed.
    pub async fn warm_up(&self) {
        match self.embed("warm-up", 0).await {
            Ok(vector) => log::debug!("Warm-up embedding ready ({} dimensions)", vector.len()),
            Err(err) => log::warn!("Warm-up embedding failed (continuing): {err}"),
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OllamaClient::new("http://localhost:11434", "nomic-embed-text");
        assert!(client.is_ok());
    }

    #[test]
    fn test_timeout_escalation() {
        // Attempt 0 tolerates a cold model; later attempts are short.
        assert_eq!(attempt_timeout(0), COLD_START_TIMEOUT);
        assert_eq!(attempt_timeout(1), RETRY_TIMEOUT);
        assert_eq!(attempt_timeout(5), RETRY_TIMEOUT);
        assert!(attempt_timeout(0) > attempt_timeout(1));
    }

    #[test]
    fn test_retry_budget_decision() {
        assert!(should_retry(0, 2));
        assert!(should_retry(1, 2));
        assert!(!should_retry(2, 2));
        assert!(!should_retry(0, 0));
    }

    #[test]
    fn test_classify_valid_response() {
        let attempt = classify_response(StatusCode::OK, r#"{"embedding": [0.1, -0.2, 0.3]}"#);
        match attempt {
            Attempt::Success(vector) => assert_eq!(vector, vec![0.1, -0.2, 0.3]),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_missing_vector_is_fatal() {
        let attempt = classify_response(StatusCode::OK, r#"{"status": "ok"}"#);
        assert!(matches!(
            attempt,
            Attempt::Fatal(SearchError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_classify_empty_vector_is_fatal() {
        let attempt = classify_response(StatusCode::OK, r#"{"embedding": []}"#);
        assert!(matches!(
            attempt,
            Attempt::Fatal(SearchError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_classify_non_200_is_retryable() {
        let attempt = classify_response(StatusCode::INTERNAL_SERVER_ERROR, "model not loaded");
        assert!(matches!(attempt, Attempt::Retryable(_)));
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_network() {
        // Unroutable base URL: a network call would error differently.
        let client = OllamaClient::new("http://concordia.invalid", "nomic-embed-text").unwrap();
        assert!(matches!(
            client.embed("", 2).await,
            Err(SearchError::EmptyInput)
        ));
        assert!(matches!(
            client.embed("   \t\n", 2).await,
            Err(SearchError::EmptyInput)
        ));
    }
}
