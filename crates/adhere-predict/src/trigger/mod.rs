//! RetrainTrigger — debounced policy deciding when a key's model must be
//! (re)fit, with per-key coalescing so one key never has two concurrent fits.

mod state;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

use adhere_core::config::{AdhereConfig, TrainerConfig, TriggerConfig};
use adhere_core::errors::{AdhereError, AdhereResult, TrainError};
use adhere_core::models::{HabitModel, ModelKey};
use adhere_core::traits::{IModelStore, IOutcomeLog};
use adhere_features::build_training_set;

pub use state::Phase;
use state::KeyState;

/// Debounced, coalescing retrain orchestrator.
///
/// Per-key mutation is serialized: at most one in-flight fit per key.
/// Different keys are fully independent. Fits run on the blocking pool under
/// a wall-clock budget; a timed-out or failed fit leaves the store untouched
/// and the previous model authoritative.
pub struct RetrainTrigger {
    store: Arc<dyn IModelStore>,
    log: Arc<dyn IOutcomeLog>,
    trainer: TrainerConfig,
    config: TriggerConfig,
    states: DashMap<ModelKey, KeyState>,
    fits_completed: AtomicU64,
    fits_failed: AtomicU64,
    handle: Handle,
}

impl RetrainTrigger {
    /// Build a trigger. Must be called within a Tokio runtime; fits are
    /// spawned onto that runtime's blocking pool.
    pub fn new(
        store: Arc<dyn IModelStore>,
        log: Arc<dyn IOutcomeLog>,
        config: &AdhereConfig,
    ) -> Arc<Self> {
        Arc::new(Self {
            store,
            log,
            trainer: config.trainer.clone(),
            config: config.trigger.clone(),
            states: DashMap::new(),
            fits_completed: AtomicU64::new(0),
            fits_failed: AtomicU64::new(0),
            handle: Handle::current(),
        })
    }

    /// One outcome was appended for `key`; `available_pairs` is how many
    /// training pairs the log can currently yield. Decides whether a fit is
    /// warranted now:
    /// (a) first time the sample floor is reached from Uninitialized/Stale, or
    /// (b) `retrain_batch` new entries accumulated since the last fit.
    pub fn observe_append(self: &Arc<Self>, key: &ModelKey, available_pairs: usize) {
        let spawn = {
            let mut entry = self.states.entry(key.clone()).or_default();
            entry.new_entries = entry.new_entries.saturating_add(1);
            let ready = available_pairs >= self.trainer.min_samples;
            let should_fit = match entry.phase {
                Phase::Retraining => {
                    if entry.new_entries >= self.config.retrain_batch {
                        entry.pending = true;
                    }
                    false
                }
                Phase::Uninitialized | Phase::Stale => ready,
                Phase::Trained => {
                    if entry.new_entries >= self.config.retrain_batch {
                        entry.phase = Phase::Stale;
                        ready
                    } else {
                        false
                    }
                }
            };
            if should_fit {
                entry.resume_phase = match entry.phase {
                    Phase::Retraining => entry.resume_phase,
                    other => other,
                };
                entry.phase = Phase::Retraining;
            }
            should_fit
        };
        if spawn {
            self.spawn_fit(key.clone());
        }
    }

    /// Force a retrain regardless of the debounce counters. Used when a
    /// prediction found the stored model corrupt or lagging behind the log.
    /// Coalesces with any in-flight fit for the key.
    pub fn request_retrain(self: &Arc<Self>, key: &ModelKey) {
        let spawn = {
            let mut entry = self.states.entry(key.clone()).or_default();
            match entry.phase {
                Phase::Retraining => {
                    entry.pending = true;
                    false
                }
                other => {
                    entry.resume_phase = other;
                    entry.phase = Phase::Retraining;
                    true
                }
            }
        };
        if spawn {
            self.spawn_fit(key.clone());
        }
    }

    /// Drop all trigger state for a key. Called on habit deletion; the key's
    /// state machine terminates here.
    pub fn remove(&self, key: &ModelKey) {
        self.states.remove(key);
    }

    /// Current phase for a key, if any state exists.
    pub fn phase(&self, key: &ModelKey) -> Option<Phase> {
        self.states.get(key).map(|entry| entry.phase)
    }

    /// Successful fits since construction.
    pub fn completed_fits(&self) -> u64 {
        self.fits_completed.load(Ordering::SeqCst)
    }

    /// Recoverable fit failures since construction.
    pub fn failed_fits(&self) -> u64 {
        self.fits_failed.load(Ordering::SeqCst)
    }

    fn spawn_fit(self: &Arc<Self>, key: ModelKey) {
        debug!(key = %key, "scheduling fit");
        let this = Arc::clone(self);
        self.handle.spawn(async move {
            let result = this.run_fit(&key).await;
            this.complete_fit(&key, result);
        });
    }

    /// Read the log, fit on the blocking pool under the time budget, then
    /// swap the result into the store. The store write happens only after a
    /// fit survives the timeout, so an abandoned fit can never publish.
    async fn run_fit(&self, key: &ModelKey) -> AdhereResult<HabitModel> {
        let previous_version = match self.store.get(key) {
            Ok(model) => model.map(|m| m.version),
            // A corrupt model has lost its lineage; refit from scratch.
            Err(e) if e.is_model_corrupt() => None,
            Err(e) => return Err(e),
        };

        let log = Arc::clone(&self.log);
        let trainer = self.trainer.clone();
        let fit_key = key.clone();
        let fit_task = tokio::task::spawn_blocking(move || {
            let logs = log.log_sequence(&fit_key)?;
            let pairs = build_training_set(&logs);
            adhere_trainer::fit(&pairs, &fit_key, previous_version, &trainer)
                .map_err(AdhereError::from)
        });

        let budget_ms = self.config.fit_budget_ms;
        let model = tokio::time::timeout(Duration::from_millis(budget_ms), fit_task)
            .await
            .map_err(|_| AdhereError::Train(TrainError::Timeout { budget_ms }))?
            .map_err(|e| {
                AdhereError::Train(TrainError::Aborted {
                    reason: format!("fit worker: {e}"),
                })
            })??;

        self.store.put(&model)?;
        Ok(model)
    }

    fn complete_fit(self: &Arc<Self>, key: &ModelKey, result: AdhereResult<HabitModel>) {
        let respawn = {
            let Some(mut entry) = self.states.get_mut(key) else {
                // Key deleted while the fit ran; withdraw anything it
                // published so deletion sticks.
                if result.is_ok() {
                    if let Err(e) = self.store.delete(key) {
                        warn!(key = %key, error = %e, "could not withdraw model for deleted key");
                    }
                }
                return;
            };
            match result {
                Ok(model) => {
                    self.fits_completed.fetch_add(1, Ordering::SeqCst);
                    info!(
                        key = %key,
                        version = model.version,
                        samples = model.sample_count,
                        "model retrained"
                    );
                    entry.phase = Phase::Trained;
                    entry.resume_phase = Phase::Trained;
                    entry.new_entries = 0;
                    if entry.pending {
                        // A request arrived mid-flight; run one follow-up fit
                        // over the entries the finished fit may have missed.
                        entry.pending = false;
                        entry.phase = Phase::Retraining;
                        true
                    } else {
                        false
                    }
                }
                Err(e) => {
                    self.fits_failed.fetch_add(1, Ordering::SeqCst);
                    warn!(
                        key = %key,
                        error = %e,
                        "retrain failed; previous model stays authoritative"
                    );
                    entry.phase = entry.resume_phase;
                    entry.pending = false;
                    false
                }
            }
        };
        if respawn {
            self.spawn_fit(key.clone());
        }
    }
}
