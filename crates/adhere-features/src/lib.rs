//! # adhere-features
//!
//! Turns an unbounded, append-only habit check-in log into the fixed-size
//! numeric representation the trainer and the prediction service consume.
//! Everything here is a pure function of its inputs.

pub mod schema;

mod extract;

pub use extract::{build_training_set, current_features};
