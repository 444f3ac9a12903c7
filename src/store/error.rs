use std::path::PathBuf;

/// Error type for store operations.
///
/// Not-found is split per record kind and kept separate from transport/IO
/// failures so callers can react differently (a missing list renders a
/// not-found view; an IO error is retryable).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("task not found: {0}")]
    TaskNotFound(u32),
    #[error("list not found: {0}")]
    ListNotFound(u32),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed store data: {0}")]
    Data(#[from] serde_json::Error),
    #[error("record missing an identifier")]
    MissingId,
}

impl StoreError {
    /// True for the two not-found variants
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::TaskNotFound(_) | StoreError::ListNotFound(_)
        )
    }
}
