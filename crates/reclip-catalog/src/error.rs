//! Catalog error types.

use thiserror::Error;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Connection lock poisoned")]
    LockPoisoned,

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid stored value: {0}")]
    InvalidValue(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn recording_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "recording",
            id: id.into(),
        }
    }

    pub fn clip_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: "clip",
            id: id.into(),
        }
    }
}
