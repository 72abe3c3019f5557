use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use adhere_core::config::AdhereConfig;
use adhere_core::constants::{MAX_HISTORY_ENTRIES, WINDOW_MIN};
use adhere_core::errors::AdhereResult;
use adhere_core::models::{LogEntry, ModelKey, Prediction};
use adhere_core::traits::{IModelStore, IOutcomeLog};

use crate::service::PredictionService;
use crate::trigger::RetrainTrigger;

/// Facade tying log, store, trigger, and service together. The host
/// application records outcomes and asks for predictions through this type
/// and never touches the components directly.
pub struct AdherenceEngine {
    store: Arc<dyn IModelStore>,
    log: Arc<dyn IOutcomeLog>,
    trigger: Arc<RetrainTrigger>,
    service: PredictionService,
}

impl AdherenceEngine {
    /// Wire up an engine. Must be called within a Tokio runtime; background
    /// fits run on that runtime.
    pub fn new(
        store: Arc<dyn IModelStore>,
        log: Arc<dyn IOutcomeLog>,
        config: &AdhereConfig,
    ) -> Self {
        let trigger = RetrainTrigger::new(Arc::clone(&store), Arc::clone(&log), config);
        let service = PredictionService::new(
            Arc::clone(&store),
            Arc::clone(&log),
            Arc::clone(&trigger),
            config,
        );
        Self {
            store,
            log,
            trigger,
            service,
        }
    }

    /// Append one check-in outcome and let the trigger decide whether the
    /// key's model needs a (re)fit. Returns the log length after the append.
    pub fn record_outcome(&self, entry: &LogEntry) -> AdhereResult<usize> {
        let new_len = self.log.append(entry)?;
        let available_pairs = new_len
            .min(MAX_HISTORY_ENTRIES)
            .saturating_sub(WINDOW_MIN);
        self.trigger.observe_append(&entry.key(), available_pairs);
        Ok(new_len)
    }

    /// Predict against the current wall clock.
    pub fn predict(&self, key: &ModelKey) -> AdhereResult<Prediction> {
        self.service.predict(key)
    }

    /// Predict for an explicit point in time.
    pub fn predict_at(&self, key: &ModelKey, now: DateTime<Utc>) -> AdhereResult<Prediction> {
        self.service.predict_at(key, now)
    }

    /// Remove the stored model and all trigger state for a key. The outcome
    /// log itself is owned by the host and left untouched.
    pub fn delete_habit(&self, key: &ModelKey) -> AdhereResult<()> {
        self.trigger.remove(key);
        self.store.delete(key)?;
        info!(key = %key, "habit model deleted");
        Ok(())
    }

    pub fn trigger(&self) -> &Arc<RetrainTrigger> {
        &self.trigger
    }
}
