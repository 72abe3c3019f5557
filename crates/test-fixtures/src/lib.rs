//! Shared fixtures: deterministic log builders plus in-memory
//! implementations of the `IOutcomeLog` and `IModelStore` seams.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Duration, TimeZone, Utc};
use dashmap::DashMap;
use std::collections::HashMap;

use adhere_core::errors::{AdhereResult, StoreError};
use adhere_core::models::{HabitModel, LogEntry, ModelKey};
use adhere_core::traits::{IModelStore, IOutcomeLog};

/// Fixed origin for generated logs: a Monday morning.
pub fn log_origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
}

/// One entry per day starting at `log_origin`, outcomes taken from `pattern`.
pub fn daily_log(user_id: &str, habit_id: &str, pattern: &[bool]) -> Vec<LogEntry> {
    daily_log_from(user_id, habit_id, log_origin(), pattern)
}

/// One entry per day starting at `start`.
pub fn daily_log_from(
    user_id: &str,
    habit_id: &str,
    start: DateTime<Utc>,
    pattern: &[bool],
) -> Vec<LogEntry> {
    pattern
        .iter()
        .enumerate()
        .map(|(i, &success)| {
            LogEntry::new(user_id, habit_id, start + Duration::days(i as i64), success)
        })
        .collect()
}

/// A well-formed trained model for a key.
pub fn trained_model(key: &ModelKey, version: u32, trained_at: DateTime<Utc>) -> HabitModel {
    use adhere_core::constants::{FEATURE_DIM, FEATURE_SCHEMA_VERSION};
    HabitModel {
        user_id: key.user_id.clone(),
        habit_id: key.habit_id.clone(),
        weights: (0..FEATURE_DIM).map(|i| 0.1 * (i as f64 + 1.0)).collect(),
        bias: 0.25,
        feature_mean: vec![0.5; FEATURE_DIM],
        feature_std: vec![1.0; FEATURE_DIM],
        trained_at,
        sample_count: 10,
        version,
        schema_version: FEATURE_SCHEMA_VERSION,
    }
}

/// A model violating the array-length invariant, for corruption tests.
pub fn corrupt_model(key: &ModelKey) -> HabitModel {
    let mut model = trained_model(key, 1, Utc::now());
    model.weights.truncate(2);
    model
}

/// A fresh random key so concurrent tests never collide.
pub fn random_key() -> ModelKey {
    ModelKey::new(
        uuid::Uuid::new_v4().to_string(),
        uuid::Uuid::new_v4().to_string(),
    )
}

/// Append-only in-memory outcome log.
#[derive(Default)]
pub struct InMemoryLog {
    entries: DashMap<ModelKey, Vec<LogEntry>>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a whole history at once.
    pub fn seed(&self, entries: &[LogEntry]) {
        for entry in entries {
            self.entries
                .entry(entry.key())
                .or_default()
                .push(entry.clone());
        }
    }
}

impl IOutcomeLog for InMemoryLog {
    fn append(&self, entry: &LogEntry) -> AdhereResult<usize> {
        let mut seq = self.entries.entry(entry.key()).or_default();
        seq.push(entry.clone());
        Ok(seq.len())
    }

    fn log_sequence(&self, key: &ModelKey) -> AdhereResult<Vec<LogEntry>> {
        Ok(self
            .entries
            .get(key)
            .map(|seq| seq.clone())
            .unwrap_or_default())
    }
}

/// In-memory model store. Performs no schema validation on `put`, which lets
/// tests inject deliberately malformed models; `get` surfaces them as
/// corrupt, mirroring the SQLite store's behavior.
#[derive(Default)]
pub struct MemoryModelStore {
    models: RwLock<HashMap<ModelKey, HabitModel>>,
    unavailable: AtomicBool,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a model bypassing every check, even last-writer-wins.
    pub fn inject(&self, model: HabitModel) {
        self.models
            .write()
            .expect("store lock")
            .insert(model.key(), model);
    }

    /// Simulate an unreachable persistence layer.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.models.read().expect("store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                message: "simulated outage".into(),
            });
        }
        Ok(())
    }
}

impl IModelStore for MemoryModelStore {
    fn get(&self, key: &ModelKey) -> AdhereResult<Option<HabitModel>> {
        self.check_available()?;
        match self.models.read().expect("store lock").get(key) {
            Some(model) => {
                model.validate_schema()?;
                Ok(Some(model.clone()))
            }
            None => Ok(None),
        }
    }

    fn put(&self, model: &HabitModel) -> AdhereResult<()> {
        self.check_available()?;
        let mut models = self.models.write().expect("store lock");
        // Last-writer-wins on trained_at, matching the SQLite store.
        if let Some(existing) = models.get(&model.key()) {
            if existing.trained_at > model.trained_at {
                return Ok(());
            }
        }
        models.insert(model.key(), model.clone());
        Ok(())
    }

    fn delete(&self, key: &ModelKey) -> AdhereResult<()> {
        self.check_available()?;
        self.models.write().expect("store lock").remove(key);
        Ok(())
    }
}
