//! Engine error types

use shared::{BatchId, ItemId, ProviderFailure};
use thiserror::Error;

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error types
///
/// Per-item provider failures never surface here; they are persisted on
/// the item and absorbed into the batch counters. This enum covers the
/// errors a caller of the pipeline can actually observe.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Validation failed: {message}")]
    ValidationError { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Provider request failed: {provider} - {reason}")]
    ProviderError { provider: String, reason: ProviderFailure },

    #[error("Document export failed: {message}")]
    ExportError { message: String },

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::ValidationError { message: message.into() }
    }

    pub fn item_not_found(id: &ItemId) -> Self {
        EngineError::NotFound { entity: "Item", id: id.to_string() }
    }

    pub fn batch_not_found(id: &BatchId) -> Self {
        EngineError::NotFound { entity: "Batch", id: id.to_string() }
    }

    pub fn export(message: impl Into<String>) -> Self {
        EngineError::ExportError { message: message.into() }
    }
}
