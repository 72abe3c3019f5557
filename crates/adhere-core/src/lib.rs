//! # adhere-core
//!
//! Foundation crate for the habit-adherence predictor.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::AdhereConfig;
pub use errors::{AdhereError, AdhereResult};
pub use models::{ConfidenceBand, FeatureVector, HabitModel, LogEntry, ModelKey, Prediction};
