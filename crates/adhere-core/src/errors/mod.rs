//! Error taxonomy for the predictor subsystem.
//!
//! Per-area enums (`TrainError`, `StoreError`) plus the `AdhereError`
//! umbrella. No error here is ever allowed to reach the end-user-facing
//! layer as an unhandled fault; the worst observable behavior is a
//! low-confidence 0.5 prediction.

mod store_error;
mod train_error;

pub use store_error::StoreError;
pub use train_error::TrainError;

/// Umbrella error for the whole subsystem.
#[derive(Debug, thiserror::Error)]
pub enum AdhereError {
    #[error("training error: {0}")]
    Train(#[from] TrainError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("outcome log error: {message}")]
    LogSource { message: String },
}

/// Result alias used across all adhere crates.
pub type AdhereResult<T> = Result<T, AdhereError>;

impl AdhereError {
    /// True when the error means the persisted model is unusable but the
    /// request itself can be served from the cold-start fallback.
    pub fn is_model_corrupt(&self) -> bool {
        matches!(self, AdhereError::Store(StoreError::ModelCorrupt { .. }))
    }
}
