use chrono::Utc;

use adhere_core::constants::{FEATURE_DIM, FEATURE_SCHEMA_VERSION};
use adhere_core::models::{ConfidenceBand, HabitModel, LogEntry, ModelKey, Prediction};

fn model(weights_len: usize, schema_version: u32) -> HabitModel {
    HabitModel {
        user_id: "u1".into(),
        habit_id: "h1".into(),
        weights: vec![0.1; weights_len],
        bias: -0.2,
        feature_mean: vec![0.0; FEATURE_DIM],
        feature_std: vec![1.0; FEATURE_DIM],
        trained_at: Utc::now(),
        sample_count: 12,
        version: 3,
        schema_version,
    }
}

#[test]
fn key_display_is_user_slash_habit() {
    let key = ModelKey::new("alice", "meditate");
    assert_eq!(key.to_string(), "alice/meditate");
}

#[test]
fn log_entry_key_matches_ids() {
    let entry = LogEntry::new("alice", "meditate", Utc::now(), true);
    assert_eq!(entry.key(), ModelKey::new("alice", "meditate"));
}

#[test]
fn cold_start_is_neutral_low_confidence() {
    let p = Prediction::cold_start();
    assert_eq!(p.probability, 0.5);
    assert_eq!(p.confidence, ConfidenceBand::Low);
    assert_eq!(p.model_version, 0);
    assert_eq!(p.sample_count, 0);
}

#[test]
fn valid_model_passes_schema_check() {
    assert!(model(FEATURE_DIM, FEATURE_SCHEMA_VERSION).validate_schema().is_ok());
}

#[test]
fn short_weight_array_is_corrupt() {
    let err = model(FEATURE_DIM - 2, FEATURE_SCHEMA_VERSION)
        .validate_schema()
        .unwrap_err();
    assert!(err.to_string().contains("weights"));
}

#[test]
fn wrong_schema_version_is_corrupt() {
    let err = model(FEATURE_DIM, FEATURE_SCHEMA_VERSION + 1)
        .validate_schema()
        .unwrap_err();
    assert!(err.to_string().contains("schema version"));
}

#[test]
fn model_round_trips_through_json() {
    let m = model(FEATURE_DIM, FEATURE_SCHEMA_VERSION);
    let json = serde_json::to_string(&m).unwrap();
    let back: HabitModel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}

#[test]
fn confidence_band_serializes_lowercase() {
    assert_eq!(
        serde_json::to_string(&ConfidenceBand::Low).unwrap(),
        "\"low\""
    );
    assert_eq!(
        serde_json::to_string(&ConfidenceBand::Normal).unwrap(),
        "\"normal\""
    );
}
