use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ModelKey;

/// One immutable recorded outcome for a habit on a given day.
/// Created exactly once per user check-in; never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub user_id: String,
    pub habit_id: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
}

impl LogEntry {
    pub fn new(
        user_id: impl Into<String>,
        habit_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        success: bool,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            habit_id: habit_id.into(),
            timestamp,
            success,
        }
    }

    /// The (user, habit) key this entry belongs to.
    pub fn key(&self) -> ModelKey {
        ModelKey::new(&self.user_id, &self.habit_id)
    }
}
