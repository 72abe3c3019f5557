//! Configuration for the predictor subsystem.
//!
//! Every struct is serde-deserializable with `#[serde(default)]`, so a
//! partial TOML file (or none at all) always yields a working config.

pub mod defaults;

mod trainer_config;
mod trigger_config;

use serde::{Deserialize, Serialize};

pub use trainer_config::TrainerConfig;
pub use trigger_config::TriggerConfig;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdhereConfig {
    pub trainer: TrainerConfig,
    pub trigger: TriggerConfig,
}

impl AdhereConfig {
    /// Parse a TOML document. Missing sections and fields fall back to
    /// defaults.
    pub fn from_toml_str(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}
