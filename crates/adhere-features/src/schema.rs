//! Index layout of the active feature schema.
//!
//! Changing anything here requires bumping
//! `adhere_core::constants::FEATURE_SCHEMA_VERSION`; models trained against
//! the old layout are then detected as corrupt and refit.

use adhere_core::constants::FEATURE_DIM;

/// Laplace-smoothed success rate over the last `RECENT_WINDOW` entries.
pub const RECENT_RATE: usize = 0;
/// Laplace-smoothed success rate over the whole history prefix.
pub const OVERALL_RATE: usize = 1;
/// ln(1 + consecutive successes ending at the reference point).
pub const STREAK: usize = 2;
/// Cyclical day-of-week encoding of the reference timestamp.
pub const DAY_OF_WEEK_SIN: usize = 3;
pub const DAY_OF_WEEK_COS: usize = 4;
/// ln(1 + hours between the last entry and the reference timestamp).
pub const RECENCY_GAP: usize = 5;
/// ln(1 + number of observed entries).
pub const OBSERVATION_COUNT: usize = 6;

/// Human-readable names, indexed by feature position.
pub const FEATURE_NAMES: [&str; FEATURE_DIM] = [
    "recent_rate",
    "overall_rate",
    "streak",
    "day_of_week_sin",
    "day_of_week_cos",
    "recency_gap",
    "observation_count",
];
