use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("duplicate title: \"{title}\" already used by document {id}")]
    DuplicateTitle { id: String, title: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl Error {
    /// Returns `true` when the error indicates a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` when a write was rejected because the normalized
    /// title is already taken.
    pub fn is_duplicate_title(&self) -> bool {
        matches!(self, Self::DuplicateTitle { .. })
    }

    /// Returns `true` when input validation rejected the caller's data.
    pub fn is_invalid_data(&self) -> bool {
        matches!(self, Self::InvalidData(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
