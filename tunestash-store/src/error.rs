use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level failure taxonomy. Point lookups report "no row" as
/// `Ok(None)`, never as an error; `NotFound` is reserved for callers
/// that require a record to exist (e.g. seed wiring by name).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("connection pool failure: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("seed decode failure: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("seed read failure: {0}")]
    Io(#[from] std::io::Error),
}
