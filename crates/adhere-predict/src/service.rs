use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use adhere_core::config::AdhereConfig;
use adhere_core::constants::{MAX_HISTORY_ENTRIES, PROB_EPSILON, RETRAIN_LAG};
use adhere_core::errors::AdhereResult;
use adhere_core::models::{ConfidenceBand, HabitModel, ModelKey, Prediction};
use adhere_core::traits::{IModelStore, IOutcomeLog};
use adhere_features::current_features;
use adhere_trainer::{sigmoid, standardize};

use crate::trigger::RetrainTrigger;

/// Serves probabilities from whatever model is currently stored. A predict
/// call is one log read, one store read, and pure arithmetic; it never waits
/// on a fit. Stale and corrupt models are handed to the trigger and the call
/// returns immediately with the best available answer.
pub struct PredictionService {
    store: Arc<dyn IModelStore>,
    log: Arc<dyn IOutcomeLog>,
    trigger: Arc<RetrainTrigger>,
    min_samples: usize,
}

impl PredictionService {
    pub fn new(
        store: Arc<dyn IModelStore>,
        log: Arc<dyn IOutcomeLog>,
        trigger: Arc<RetrainTrigger>,
        config: &AdhereConfig,
    ) -> Self {
        Self {
            store,
            log,
            trigger,
            min_samples: config.trainer.min_samples,
        }
    }

    /// Predict against the current wall clock.
    pub fn predict(&self, key: &ModelKey) -> AdhereResult<Prediction> {
        self.predict_at(key, Utc::now())
    }

    /// Predict the probability that the next check-in at `now` succeeds.
    ///
    /// Cold start (no model yet, or a history shorter than the sample
    /// floor) and a corrupt stored model all return the neutral
    /// low-confidence prediction; corruption additionally schedules a refit.
    /// Store outages propagate as errors since no answer is honest without
    /// the store.
    pub fn predict_at(&self, key: &ModelKey, now: DateTime<Utc>) -> AdhereResult<Prediction> {
        let model = match self.store.get(key) {
            Ok(model) => model,
            Err(e) if e.is_model_corrupt() => {
                warn!(key = %key, error = %e, "stored model corrupt, refitting");
                self.trigger.request_retrain(key);
                return Ok(Prediction::cold_start());
            }
            Err(e) => return Err(e),
        };

        let Some(model) = model else {
            debug!(key = %key, "no model yet, serving cold start");
            return Ok(Prediction::cold_start());
        };

        let logs = self.log.log_sequence(key)?;
        // A stored model never outranks the sample floor: too little history
        // means a neutral answer, even if an old model row survives.
        if logs.len() < self.min_samples {
            debug!(
                key = %key,
                entries = logs.len(),
                floor = self.min_samples,
                "history below the sample floor, serving cold start"
            );
            return Ok(Prediction::cold_start());
        }

        let features = current_features(&logs, now);
        let probability = score(&model, &features.values);

        // A model that has fallen far behind the log still answers this
        // request; the refit happens off the request path.
        let effective_len = logs.len().min(MAX_HISTORY_ENTRIES);
        if effective_len.saturating_sub(model.sample_count) > RETRAIN_LAG {
            debug!(
                key = %key,
                log_len = effective_len,
                trained_on = model.sample_count,
                "model lagging behind log, scheduling refit"
            );
            self.trigger.request_retrain(key);
        }

        Ok(Prediction {
            probability,
            confidence: ConfidenceBand::Normal,
            model_version: model.version,
            sample_count: model.sample_count,
        })
    }
}

/// Apply the model's frozen standardization and weights to a raw feature
/// vector, clamping away exact 0.0 and 1.0.
fn score(model: &HabitModel, features: &[f64]) -> f64 {
    let scaled = standardize::apply(&model.feature_mean, &model.feature_std, features);
    let z: f64 = scaled
        .iter()
        .zip(&model.weights)
        .map(|(x, w)| x * w)
        .sum::<f64>()
        + model.bias;
    sigmoid(z).clamp(PROB_EPSILON, 1.0 - PROB_EPSILON)
}
