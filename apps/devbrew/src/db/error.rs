use record_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("seed data error: {0}")]
    Bootstrap(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
