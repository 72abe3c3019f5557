//! Trait seams between the predictor and its collaborators.

mod log_source;
mod store;

pub use log_source::IOutcomeLog;
pub use store::IModelStore;
