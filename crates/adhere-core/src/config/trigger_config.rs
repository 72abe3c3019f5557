use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrain-trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// New entries since the last successful fit that force a retrain.
    /// Debounces so a single logged event does not always refit.
    pub retrain_batch: u32,
    /// Wall-clock budget for one fit, in milliseconds. A fit past this is
    /// abandoned and the previous model stays authoritative.
    pub fit_budget_ms: u64,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            retrain_batch: defaults::DEFAULT_RETRAIN_BATCH,
            fit_budget_ms: defaults::DEFAULT_FIT_BUDGET_MS,
        }
    }
}
