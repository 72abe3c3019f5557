//! Default values shared by the config structs.

/// Minimum training pairs before a model may be fit.
pub const DEFAULT_MIN_SAMPLES: usize = 5;

/// New entries since the last successful fit that force a retrain.
pub const DEFAULT_RETRAIN_BATCH: u32 = 3;

/// Gradient-descent step size on standardized features.
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;

/// L2 penalty on the weight vector (bias excluded). Per-habit datasets are
/// tiny and frequently near-separable, so shrinkage is deliberately strong.
pub const DEFAULT_L2_PENALTY: f64 = 2.0;

/// Fixed iteration cap for the descent loop.
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Early-stop threshold on the largest absolute parameter update.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Wall-clock budget for a single fit, in milliseconds.
pub const DEFAULT_FIT_BUDGET_MS: u64 = 10_000;
