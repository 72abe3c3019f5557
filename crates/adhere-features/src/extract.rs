//! Feature computation over ordered log history.

use chrono::{DateTime, Datelike, Utc};

use adhere_core::constants::{MAX_HISTORY_ENTRIES, RECENT_WINDOW, WINDOW_MIN};
use adhere_core::models::{FeatureVector, LogEntry};

/// Emit one (features, label) pair per position `i >= WINDOW_MIN`.
///
/// The features for pair `i` are computed strictly from entries `< i`, with
/// entry `i`'s timestamp as the reference point; the label is entry `i`'s
/// success flag. The labeled entry itself never reaches the features, which
/// is what prevents label leakage into training.
pub fn build_training_set(logs: &[LogEntry]) -> Vec<(FeatureVector, bool)> {
    let logs = tail(logs);
    if logs.len() <= WINDOW_MIN {
        return Vec::new();
    }
    (WINDOW_MIN..logs.len())
        .map(|i| (compute(&logs[..i], logs[i].timestamp), logs[i].success))
        .collect()
}

/// Features "as of now": the whole available history as context, with `now`
/// substituted as the reference timestamp. Streak and recency are therefore
/// relative to today, not to the last logged entry.
pub fn current_features(logs: &[LogEntry], now: DateTime<Utc>) -> FeatureVector {
    compute(tail(logs), now)
}

/// History is capped at the most recent `MAX_HISTORY_ENTRIES` entries.
fn tail(logs: &[LogEntry]) -> &[LogEntry] {
    let start = logs.len().saturating_sub(MAX_HISTORY_ENTRIES);
    &logs[start..]
}

fn compute(history: &[LogEntry], reference: DateTime<Utc>) -> FeatureVector {
    let recent_start = history.len().saturating_sub(RECENT_WINDOW);
    let recent_rate = smoothed_rate(&history[recent_start..]);
    let overall_rate = smoothed_rate(history);

    let streak = trailing_streak(history);

    let weekday = reference.weekday().num_days_from_monday() as f64;
    let angle = std::f64::consts::TAU * weekday / 7.0;

    let recency_hours = history
        .last()
        .map(|last| {
            let minutes = (reference - last.timestamp).num_minutes();
            (minutes.max(0) as f64) / 60.0
        })
        .unwrap_or(0.0);

    FeatureVector::new(vec![
        recent_rate,
        overall_rate,
        (streak as f64).ln_1p(),
        angle.sin(),
        angle.cos(),
        recency_hours.ln_1p(),
        (history.len() as f64).ln_1p(),
    ])
}

/// Laplace-smoothed success ratio: (successes + 1) / (count + 2).
/// An all-success or all-failure window never yields an exact 0 or 1, so
/// the classifier's log-odds stay bounded.
fn smoothed_rate(entries: &[LogEntry]) -> f64 {
    let successes = entries.iter().filter(|e| e.success).count();
    (successes as f64 + 1.0) / (entries.len() as f64 + 2.0)
}

/// Consecutive successes ending at the reference point.
fn trailing_streak(history: &[LogEntry]) -> usize {
    history.iter().rev().take_while(|e| e.success).count()
}
