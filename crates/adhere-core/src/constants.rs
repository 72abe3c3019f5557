/// Adhere system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Dimensionality of the active feature schema.
pub const FEATURE_DIM: usize = 7;

/// Monotonically increasing feature-schema version. A persisted model whose
/// schema version or array lengths disagree with this is corrupt.
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Minimum history prefix before a training pair is emitted.
pub const WINDOW_MIN: usize = 3;

/// Rolling window for the recent success-rate feature.
pub const RECENT_WINDOW: usize = 7;

/// Most recent log entries considered for features and training.
pub const MAX_HISTORY_ENTRIES: usize = 200;

/// Predictions are clamped to [PROB_EPSILON, 1 - PROB_EPSILON] so the
/// coaching layer never sees an exact 0 or 1.
pub const PROB_EPSILON: f64 = 1e-6;

/// New entries a model may lag behind the log before a prediction
/// asynchronously signals a retrain.
pub const RETRAIN_LAG: usize = 5;
