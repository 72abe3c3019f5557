use chrono::Utc;
use tracing::debug;

use adhere_core::config::TrainerConfig;
use adhere_core::constants::{FEATURE_SCHEMA_VERSION, WINDOW_MIN};
use adhere_core::errors::TrainError;
use adhere_core::models::{FeatureVector, HabitModel, ModelKey};

use crate::logistic;
use crate::standardize;

/// Fit a model from (features, label) pairs.
///
/// Fails with `InsufficientData` below the configured floor; the retrain
/// trigger must not invoke this earlier. `sample_count` is derived from the
/// pair count (each pair consumes one log entry beyond the `WINDOW_MIN`
/// warm-up prefix), so it always equals the capped log length the feature
/// extractor saw.
pub fn fit(
    pairs: &[(FeatureVector, bool)],
    key: &ModelKey,
    previous_version: Option<u32>,
    config: &TrainerConfig,
) -> Result<HabitModel, TrainError> {
    if pairs.len() < config.min_samples {
        return Err(TrainError::InsufficientData {
            available: pairs.len(),
            required: config.min_samples,
        });
    }
    if pairs.iter().any(|(fv, _)| !fv.is_finite()) {
        return Err(TrainError::Aborted {
            reason: "non-finite feature vector in training set".into(),
        });
    }

    let standardizer = standardize::fit(
        &pairs
            .iter()
            .map(|(fv, _)| fv.values.clone())
            .collect::<Vec<_>>(),
    );
    let rows: Vec<Vec<f64>> = pairs
        .iter()
        .map(|(fv, _)| standardize::apply(&standardizer.mean, &standardizer.std, &fv.values))
        .collect();
    let labels: Vec<f64> = pairs
        .iter()
        .map(|(_, label)| if *label { 1.0 } else { 0.0 })
        .collect();

    let outcome = logistic::descend(&rows, &labels, config)?;
    let version = previous_version.map_or(1, |v| v + 1);

    debug!(
        key = %key,
        version,
        samples = pairs.len(),
        iterations = outcome.iterations,
        "fit complete"
    );

    Ok(HabitModel {
        user_id: key.user_id.clone(),
        habit_id: key.habit_id.clone(),
        weights: outcome.weights,
        bias: outcome.bias,
        feature_mean: standardizer.mean,
        feature_std: standardizer.std,
        trained_at: Utc::now(),
        sample_count: pairs.len() + WINDOW_MIN,
        version,
        schema_version: FEATURE_SCHEMA_VERSION,
    })
}
