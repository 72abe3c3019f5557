use std::fmt;

use serde::{Deserialize, Serialize};

/// Key identifying exactly one live model: strictly local to one
/// (user, habit) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelKey {
    pub user_id: String,
    pub habit_id: String,
}

impl ModelKey {
    pub fn new(user_id: impl Into<String>, habit_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            habit_id: habit_id.into(),
        }
    }
}

impl fmt::Display for ModelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.user_id, self.habit_id)
    }
}
