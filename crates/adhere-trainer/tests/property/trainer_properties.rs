use adhere_core::config::TrainerConfig;
use adhere_core::constants::PROB_EPSILON;
use adhere_features::{build_training_set, current_features};
use adhere_trainer::{fit, sigmoid, standardize};
use adhere_core::models::ModelKey;
use chrono::{Duration, Utc};
use proptest::prelude::*;
use test_fixtures::daily_log;

fn arb_trainable_pattern() -> impl Strategy<Value = Vec<bool>> {
    // Long enough that build_training_set clears the sample floor.
    prop::collection::vec(any::<bool>(), 10..60)
}

proptest! {
    // For all log sequences, a fitted model's score on "features as of now"
    // stays strictly inside (0, 1) after clamping.
    #[test]
    fn scores_stay_inside_the_open_unit_interval(pattern in arb_trainable_pattern()) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        let model = fit(&pairs, &ModelKey::new("u", "h"), None, &TrainerConfig::default())
            .unwrap();

        let now = logs.last().unwrap().timestamp + Duration::days(1);
        let fv = current_features(&logs, now);
        let x = standardize::apply(&model.feature_mean, &model.feature_std, &fv.values);
        let z: f64 = model.weights.iter().zip(&x).map(|(w, v)| w * v).sum::<f64>() + model.bias;
        let p = sigmoid(z).clamp(PROB_EPSILON, 1.0 - PROB_EPSILON);
        prop_assert!(p > 0.0 && p < 1.0);
    }

    // L2 regularization keeps weights bounded even on degenerate
    // (near-constant-label) sequences.
    #[test]
    fn weights_stay_finite_and_bounded(pattern in arb_trainable_pattern()) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        let model = fit(&pairs, &ModelKey::new("u", "h"), None, &TrainerConfig::default())
            .unwrap();
        for w in &model.weights {
            prop_assert!(w.is_finite());
            prop_assert!(w.abs() < 10.0, "weight blew up: {}", w);
        }
        prop_assert!(model.bias.is_finite());
    }

    // Frozen standardization stats are reproducible from the training set.
    #[test]
    fn stored_stats_match_a_refit(pattern in arb_trainable_pattern()) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        let model = fit(&pairs, &ModelKey::new("u", "h"), None, &TrainerConfig::default())
            .unwrap();
        let rows: Vec<Vec<f64>> = pairs.iter().map(|(fv, _)| fv.values.clone()).collect();
        let st = standardize::fit(&rows);
        prop_assert_eq!(model.feature_mean, st.mean);
        prop_assert_eq!(model.feature_std, st.std);
    }

    #[test]
    fn trained_at_is_set_at_fit_time(pattern in arb_trainable_pattern()) {
        let before = Utc::now();
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        let model = fit(&pairs, &ModelKey::new("u", "h"), None, &TrainerConfig::default())
            .unwrap();
        prop_assert!(model.trained_at >= before);
        prop_assert!(model.trained_at <= Utc::now());
    }
}
