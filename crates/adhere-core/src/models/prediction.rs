use serde::{Deserialize, Serialize};

/// How much the caller should trust a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBand {
    /// Cold start or corrupted model; the probability is the neutral 0.5.
    Low,
    /// Backed by a trained model.
    Normal,
}

/// Result of one prediction request. Ephemeral; produced fresh on every
/// request and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub probability: f64,
    pub confidence: ConfidenceBand,
    /// Version of the model that produced this, 0 when cold start.
    pub model_version: u32,
    /// Log entries the model was trained on, 0 when cold start.
    pub sample_count: usize,
}

impl Prediction {
    /// The explicit cold-start policy: a neutral 0.5 at low confidence.
    /// No model is fabricated from population priors.
    pub fn cold_start() -> Self {
        Self {
            probability: 0.5,
            confidence: ConfidenceBand::Low,
            model_version: 0,
            sample_count: 0,
        }
    }
}
