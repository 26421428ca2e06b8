//! Error types for the search pipeline.

use thiserror::Error;

/// Errors that can occur along the query and ingest paths.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The search query was empty after trimming.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// No usable text was provided for embedding.
    #[error("no text provided for embedding")]
    EmptyInput,

    /// A syntactically valid citation did not resolve to a verse.
    #[error("citation \"{query}\" not found (expected a form like \"Lucas 2,15\")")]
    CitationNotFound { query: String },

    /// The embedding provider stayed unreachable through the whole
    /// retry budget; carries the last underlying cause.
    #[error("embedding provider unavailable after {attempts} attempt(s): {cause}")]
    EmbeddingUnavailable { attempts: u32, cause: String },

    /// The provider answered 200 without a usable vector. Not retried.
    #[error("malformed embedding response: {message}")]
    MalformedResponse { message: String },

    /// Two vectors of different lengths were compared.
    #[error("embedding length mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// An error propagated from the core domain layer.
    #[error("{0}")]
    Core(#[from] concordia_core::Error),
}

impl SearchError {
    /// Returns `true` when the error is an infrastructure outage the
    /// user cannot correct (surfaced as a generic server failure).
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::EmbeddingUnavailable { .. } | Self::Request(_))
    }

    /// Returns `true` when the error is correctable by the caller and
    /// should be reported as a structured, non-fatal response.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::EmptyQuery | Self::EmptyInput | Self::CitationNotFound { .. } => true,
            Self::Core(core) => {
                core.is_duplicate_title() || core.is_not_found() || core.is_invalid_data()
            }
            _ => false,
        }
    }
}

/// Convenience alias for search results.
pub type SearchResult<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_not_transient() {
        let err = SearchError::CitationNotFound {
            query: "Lucas 2,15".to_string(),
        };
        assert!(err.is_user_error());
        assert!(!err.is_transient());
    }

    #[test]
    fn test_exhaustion_is_transient() {
        let err = SearchError::EmbeddingUnavailable {
            attempts: 3,
            cause: "connection refused".to_string(),
        };
        assert!(err.is_transient());
        assert!(!err.is_user_error());
    }

    #[test]
    fn test_duplicate_title_is_a_user_error() {
        let err = SearchError::Core(concordia_core::Error::DuplicateTitle {
            id: "abc".to_string(),
            title: "Salmo 23".to_string(),
        });
        assert!(err.is_user_error());
    }
}
