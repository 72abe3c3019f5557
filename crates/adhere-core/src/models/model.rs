use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{FEATURE_DIM, FEATURE_SCHEMA_VERSION};
use crate::errors::StoreError;

use super::ModelKey;

/// The learned artifact for one (user, habit) key.
///
/// Replaced wholesale on every retrain, never patched in place. The
/// standardization stats (`feature_mean`/`feature_std`) are fit once at
/// training time and frozen for this model version; inference must reuse
/// them and never recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitModel {
    pub user_id: String,
    pub habit_id: String,
    pub weights: Vec<f64>,
    pub bias: f64,
    pub feature_mean: Vec<f64>,
    pub feature_std: Vec<f64>,
    pub trained_at: DateTime<Utc>,
    /// Number of log entries consumed by the fit.
    pub sample_count: usize,
    /// Monotonically increasing per key; the first trained model is 1.
    /// 0 is reserved for the cold-start sentinel in prediction results.
    pub version: u32,
    /// Feature schema this model was trained against.
    pub schema_version: u32,
}

impl HabitModel {
    pub fn key(&self) -> ModelKey {
        ModelKey::new(&self.user_id, &self.habit_id)
    }

    /// Check the corruption invariant: all arrays match the active feature
    /// schema. A persisted model failing this must be treated as cold start
    /// and refit immediately.
    pub fn validate_schema(&self) -> Result<(), StoreError> {
        if self.schema_version != FEATURE_SCHEMA_VERSION {
            return Err(StoreError::ModelCorrupt {
                details: format!(
                    "schema version {} does not match active version {}",
                    self.schema_version, FEATURE_SCHEMA_VERSION
                ),
            });
        }
        for (name, len) in [
            ("weights", self.weights.len()),
            ("feature_mean", self.feature_mean.len()),
            ("feature_std", self.feature_std.len()),
        ] {
            if len != FEATURE_DIM {
                return Err(StoreError::ModelCorrupt {
                    details: format!("{name} has length {len}, expected {FEATURE_DIM}"),
                });
            }
        }
        Ok(())
    }
}
