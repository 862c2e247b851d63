//! Storage error taxonomy shared by every backend.

/// Errors surfaced by the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique field already holds this value on another live record.
    #[error("duplicate value for unique field '{field}'")]
    Duplicate { field: &'static str },

    /// The targeted record does not exist.
    #[error("record not found")]
    NotFound,

    /// The backend itself failed. Not retried; surfaced to the caller.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
