use crate::errors::AdhereResult;
use crate::models::{HabitModel, ModelKey};

/// Durable, atomic persistence of one model per (user, habit) key.
///
/// `put` must be atomic with respect to concurrent `get`s: a reader observes
/// either the previous model in full or the new one in full, never a partial
/// record. Concurrent `put`s for the same key resolve last-writer-wins on
/// `trained_at`; the losing model is discarded.
pub trait IModelStore: Send + Sync {
    fn get(&self, key: &ModelKey) -> AdhereResult<Option<HabitModel>>;
    fn put(&self, model: &HabitModel) -> AdhereResult<()>;
    /// Reachable only from habit deletion.
    fn delete(&self, key: &ModelKey) -> AdhereResult<()>;
}
