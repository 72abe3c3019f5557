/// Trainer-side errors. All of these are locally recoverable: the retrain
/// trigger logs them and keeps the previous model authoritative.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    #[error("insufficient data: {available} samples available, {required} required")]
    InsufficientData { available: usize, required: usize },

    #[error("non-finite weights after {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("fit exceeded time budget of {budget_ms}ms")]
    Timeout { budget_ms: u64 },

    #[error("fit aborted: {reason}")]
    Aborted { reason: String },
}
