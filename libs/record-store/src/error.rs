use thiserror::Error;

use crate::backend::BackendError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
