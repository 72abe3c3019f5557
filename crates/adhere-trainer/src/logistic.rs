//! Full-batch gradient descent on regularized logistic loss.

use adhere_core::config::TrainerConfig;
use adhere_core::errors::TrainError;

/// Numerically plain sigmoid; inputs here are bounded by the L2 penalty and
/// standardized features, so no special-casing is needed.
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Converged (or capped) descent output.
#[derive(Debug, Clone)]
pub struct DescentOutcome {
    pub weights: Vec<f64>,
    pub bias: f64,
    pub iterations: usize,
}

/// Minimize mean log-loss + (l2_penalty / 2)·‖w‖² over standardized rows.
///
/// The bias is deliberately unregularized: with a near-constant label the
/// base rate must still be expressible while the weights shrink toward 0.
/// Deterministic by construction: zero init, fixed step size, fixed
/// iteration cap, early stop on the largest absolute parameter update.
pub fn descend(
    rows: &[Vec<f64>],
    labels: &[f64],
    config: &TrainerConfig,
) -> Result<DescentOutcome, TrainError> {
    let n = rows.len();
    let dim = rows.first().map(Vec::len).unwrap_or(0);

    let mut weights = vec![0.0; dim];
    let mut bias = 0.0;
    let mut iterations = 0;

    for iter in 0..config.max_iterations {
        iterations = iter + 1;

        let mut grad_w = vec![0.0; dim];
        let mut grad_b = 0.0;
        for (row, &label) in rows.iter().zip(labels) {
            let z = dot(&weights, row) + bias;
            let residual = sigmoid(z) - label;
            for (g, v) in grad_w.iter_mut().zip(row) {
                *g += residual * v;
            }
            grad_b += residual;
        }

        let mut max_update = 0.0f64;
        for (w, g) in weights.iter_mut().zip(&grad_w) {
            let update = config.learning_rate * (g / n as f64 + config.l2_penalty * *w);
            *w -= update;
            max_update = max_update.max(update.abs());
        }
        let bias_update = config.learning_rate * (grad_b / n as f64);
        bias -= bias_update;
        max_update = max_update.max(bias_update.abs());

        if bias.is_finite() && weights.iter().all(|w| w.is_finite()) {
            if max_update < config.tolerance {
                break;
            }
        } else {
            return Err(TrainError::NonConvergence { iterations });
        }
    }

    Ok(DescentOutcome {
        weights,
        bias,
        iterations,
    })
}

pub(crate) fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
