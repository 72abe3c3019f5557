use serde::{Deserialize, Serialize};

use crate::constants::FEATURE_DIM;

/// Fixed-length numeric summary of a habit's history, used as classifier
/// input. Always `FEATURE_DIM` values in schema order; see
/// `adhere-features::schema` for the index layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub values: Vec<f64>,
}

impl FeatureVector {
    pub fn new(values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), FEATURE_DIM);
        Self { values }
    }

    pub fn dim(&self) -> usize {
        self.values.len()
    }

    /// All components finite. Used as a guard before training/scoring.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}
