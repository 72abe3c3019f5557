use crate::errors::AdhereResult;
use crate::models::{LogEntry, ModelKey};

/// The habit check-in log, owned by the host CRUD/storage layer.
///
/// Entries are append-only and returned in ascending timestamp order.
pub trait IOutcomeLog: Send + Sync {
    /// Append one outcome. Returns the new sequence length for the
    /// entry's key.
    fn append(&self, entry: &LogEntry) -> AdhereResult<usize>;

    /// Full ordered history for one (user, habit) pair.
    fn log_sequence(&self, key: &ModelKey) -> AdhereResult<Vec<LogEntry>>;
}
