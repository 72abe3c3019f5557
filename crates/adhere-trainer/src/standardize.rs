//! Per-feature standardization (zero mean, unit variance).
//!
//! Statistics are computed from the training set once, stored in the
//! resulting model, and reused verbatim at inference time on the same model
//! version.

/// Standard deviations below this are treated as constant features.
const STD_FLOOR: f64 = 1e-9;

/// Frozen standardization statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    pub mean: Vec<f64>,
    pub std: Vec<f64>,
}

/// Fit mean/std per column. A (near-)constant column gets std 1.0, so after
/// centering it contributes exactly 0 to every score.
pub fn fit(rows: &[Vec<f64>]) -> Standardizer {
    let dim = rows.first().map(Vec::len).unwrap_or(0);
    let n = rows.len() as f64;

    let mut mean = vec![0.0; dim];
    for row in rows {
        for (m, v) in mean.iter_mut().zip(row) {
            *m += v;
        }
    }
    for m in &mut mean {
        *m /= n;
    }

    let mut std = vec![0.0; dim];
    for row in rows {
        for ((s, v), m) in std.iter_mut().zip(row).zip(&mean) {
            *s += (v - m) * (v - m);
        }
    }
    for s in &mut std {
        *s = (*s / n).sqrt();
        if *s < STD_FLOOR {
            *s = 1.0;
        }
    }

    Standardizer { mean, std }
}

/// Apply frozen statistics to one row.
pub fn apply(mean: &[f64], std: &[f64], values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .zip(mean)
        .zip(std)
        .map(|((v, m), s)| (v - m) / s)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standardized_columns_have_zero_mean() {
        let rows = vec![vec![1.0, 10.0], vec![3.0, 30.0], vec![5.0, 50.0]];
        let st = fit(&rows);
        let mut sums = vec![0.0; 2];
        for row in &rows {
            for (sum, v) in sums.iter_mut().zip(apply(&st.mean, &st.std, row)) {
                *sum += v;
            }
        }
        for sum in sums {
            assert!(sum.abs() < 1e-12);
        }
    }

    #[test]
    fn constant_column_maps_to_zero() {
        let rows = vec![vec![4.2], vec![4.2], vec![4.2]];
        let st = fit(&rows);
        assert_eq!(st.std[0], 1.0);
        assert_eq!(apply(&st.mean, &st.std, &[4.2])[0], 0.0);
    }
}
