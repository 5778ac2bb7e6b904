mod json_store;

pub use json_store::{Collection, Entity, JsonStore};

use uuid::Uuid;

/// Failures of the flat-file entity store. Every store operation returns an
/// explicit `Result`; callers decide their own fallback policy.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{collection} record {id} not found")]
    NotFound { collection: &'static str, id: Uuid },
}
