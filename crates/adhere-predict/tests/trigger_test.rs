//! Trigger state machine: debounce, coalescing, and failure recovery.
//!
//! Coalescing tests run on the current-thread runtime so spawned fits cannot
//! start until the test awaits, making the interleaving deterministic.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as ChronoDuration;

use adhere_core::config::AdhereConfig;
use adhere_core::models::{LogEntry, ModelKey};
use adhere_core::traits::{IModelStore, IOutcomeLog};
use adhere_predict::{Phase, PredictionService, RetrainTrigger};
use test_fixtures::{
    daily_log, daily_log_from, log_origin, trained_model, InMemoryLog, MemoryModelStore,
};

fn setup() -> (Arc<RetrainTrigger>, Arc<MemoryModelStore>, Arc<InMemoryLog>) {
    let store = Arc::new(MemoryModelStore::new());
    let log = Arc::new(InMemoryLog::new());
    let trigger = RetrainTrigger::new(
        Arc::clone(&store) as Arc<_>,
        Arc::clone(&log) as Arc<_>,
        &AdhereConfig::default(),
    );
    (trigger, store, log)
}

/// Append through the log and notify the trigger, the way the engine does.
fn record(log: &InMemoryLog, trigger: &Arc<RetrainTrigger>, entries: &[LogEntry]) {
    for entry in entries {
        let len = log.append(entry).unwrap();
        trigger.observe_append(&entry.key(), len.saturating_sub(3));
    }
}

async fn wait_until(mut cond: impl FnMut() -> bool) {
    for _ in 0..500 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within 5s");
}

#[tokio::test(flavor = "multi_thread")]
async fn appends_below_batch_threshold_do_not_refit() {
    let (trigger, store, log) = setup();
    let key = ModelKey::new("u", "h");

    record(&log, &trigger, &daily_log("u", "h", &[true; 8]));
    wait_until(|| trigger.completed_fits() == 1 && trigger.phase(&key) == Some(Phase::Trained))
        .await;
    assert_eq!(store.get(&key).unwrap().unwrap().sample_count, 8);

    // Two fresh entries are below the batch threshold of three.
    let quiet = daily_log_from("u", "h", log_origin() + ChronoDuration::days(8), &[true, false]);
    record(&log, &trigger, &quiet);
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(trigger.completed_fits(), 1);
    assert_eq!(trigger.phase(&key), Some(Phase::Trained));

    // The third tips it over.
    let third = daily_log_from("u", "h", log_origin() + ChronoDuration::days(10), &[true]);
    record(&log, &trigger, &third);
    wait_until(|| trigger.completed_fits() == 2 && trigger.phase(&key) == Some(Phase::Trained))
        .await;
    assert_eq!(store.get(&key).unwrap().unwrap().sample_count, 11);
    assert_eq!(store.get(&key).unwrap().unwrap().version, 2);
}

#[tokio::test]
async fn concurrent_requests_coalesce_into_one_follow_up() {
    let (trigger, store, log) = setup();
    let key = ModelKey::new("u", "h");
    log.seed(&daily_log("u", "h", &[true; 10]));

    // On the current-thread runtime none of these fits start until we await,
    // so the first request is in flight and the rest must fold into a single
    // pending follow-up.
    for _ in 0..5 {
        trigger.request_retrain(&key);
    }
    wait_until(|| trigger.completed_fits() == 2 && trigger.phase(&key) == Some(Phase::Trained))
        .await;

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(trigger.completed_fits(), 2);
    assert_eq!(store.get(&key).unwrap().unwrap().version, 2);
}

#[tokio::test]
async fn failed_fit_restores_phase_and_later_succeeds() {
    let (trigger, store, log) = setup();
    let key = ModelKey::new("u", "h");
    log.seed(&daily_log("u", "h", &[true; 10]));

    store.set_unavailable(true);
    trigger.request_retrain(&key);
    wait_until(|| trigger.failed_fits() == 1).await;
    assert_eq!(trigger.phase(&key), Some(Phase::Uninitialized));
    assert_eq!(trigger.completed_fits(), 0);

    store.set_unavailable(false);
    trigger.request_retrain(&key);
    wait_until(|| trigger.completed_fits() == 1).await;
    assert_eq!(store.get(&key).unwrap().unwrap().version, 1);
}

#[tokio::test]
async fn forced_retrain_below_sample_floor_fails_cleanly() {
    let (trigger, store, log) = setup();
    let key = ModelKey::new("u", "h");
    log.seed(&daily_log("u", "h", &[true, true, false, true]));

    trigger.request_retrain(&key);
    wait_until(|| trigger.failed_fits() == 1).await;
    assert!(store.is_empty());
    assert_eq!(trigger.phase(&key), Some(Phase::Uninitialized));
}

#[tokio::test]
async fn remove_drops_all_key_state() {
    let (trigger, _, log) = setup();
    let key = ModelKey::new("u", "h");

    record(&log, &trigger, &daily_log("u", "h", &[true, false]));
    assert!(trigger.phase(&key).is_some());

    trigger.remove(&key);
    assert_eq!(trigger.phase(&key), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn lagging_model_answers_immediately_and_refits_behind() {
    let (trigger, store, log) = setup();
    let key = ModelKey::new("u", "h");

    // A model trained on 10 entries while the log has grown to 20.
    log.seed(&daily_log("u", "h", &[true; 20]));
    store.inject(trained_model(&key, 3, log_origin()));

    let service = PredictionService::new(
        Arc::clone(&store) as Arc<_>,
        Arc::clone(&log) as Arc<_>,
        Arc::clone(&trigger),
        &AdhereConfig::default(),
    );

    // The stale model still answers this request.
    let stale = service.predict(&key).unwrap();
    assert_eq!(stale.model_version, 3);
    assert_eq!(stale.sample_count, 10);

    wait_until(|| trigger.completed_fits() == 1).await;
    let fresh = service.predict(&key).unwrap();
    assert_eq!(fresh.model_version, 4);
    assert_eq!(fresh.sample_count, 20);
}
