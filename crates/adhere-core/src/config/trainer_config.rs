use serde::{Deserialize, Serialize};

use super::defaults;

/// Trainer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Minimum training pairs; below this the trainer refuses to fit.
    pub min_samples: usize,
    /// Gradient-descent step size.
    pub learning_rate: f64,
    /// L2 penalty on weights (bias unregularized).
    pub l2_penalty: f64,
    /// Fixed iteration cap. Determinism requires this to be a hard limit.
    pub max_iterations: usize,
    /// Early-stop threshold on the largest absolute parameter update.
    pub tolerance: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            min_samples: defaults::DEFAULT_MIN_SAMPLES,
            learning_rate: defaults::DEFAULT_LEARNING_RATE,
            l2_penalty: defaults::DEFAULT_L2_PENALTY,
            max_iterations: defaults::DEFAULT_MAX_ITERATIONS,
            tolerance: defaults::DEFAULT_TOLERANCE,
        }
    }
}
