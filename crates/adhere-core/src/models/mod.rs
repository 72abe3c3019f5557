//! Data model: log entries, keys, feature vectors, trained models,
//! prediction results.

mod feature_vector;
mod log_entry;
mod model;
mod model_key;
mod prediction;

pub use feature_vector::FeatureVector;
pub use log_entry::LogEntry;
pub use model::HabitModel;
pub use model_key::ModelKey;
pub use prediction::{ConfidenceBand, Prediction};
