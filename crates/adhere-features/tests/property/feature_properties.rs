use adhere_core::constants::{FEATURE_DIM, WINDOW_MIN};
use adhere_features::{build_training_set, current_features, schema};
use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use test_fixtures::daily_log;

fn arb_pattern() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..60)
}

proptest! {
    #[test]
    fn rates_stay_strictly_inside_unit_interval(pattern in arb_pattern()) {
        let logs = daily_log("u", "h", &pattern);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let fv = current_features(&logs, now);
        prop_assert_eq!(fv.dim(), FEATURE_DIM);
        prop_assert!(fv.is_finite());
        for idx in [schema::RECENT_RATE, schema::OVERALL_RATE] {
            prop_assert!(fv.values[idx] > 0.0 && fv.values[idx] < 1.0,
                "rate at {} out of (0,1): {}", idx, fv.values[idx]);
        }
    }

    #[test]
    fn pair_count_matches_history_length(pattern in arb_pattern()) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        prop_assert_eq!(pairs.len(), logs.len().saturating_sub(WINDOW_MIN));
    }

    // The label for pair i must never appear inside the features for pair i:
    // flipping entry i's outcome may change the label, but never the features.
    #[test]
    fn flipping_an_outcome_never_changes_its_own_features(
        pattern in prop::collection::vec(any::<bool>(), (WINDOW_MIN + 1)..40),
        pick in any::<prop::sample::Index>(),
    ) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);
        let i = WINDOW_MIN + pick.index(pairs.len());

        let mut flipped = pattern.clone();
        flipped[i] = !flipped[i];
        let flipped_logs = daily_log("u", "h", &flipped);
        let flipped_pairs = build_training_set(&flipped_logs);

        let offset = i - WINDOW_MIN;
        prop_assert_eq!(&pairs[offset].0, &flipped_pairs[offset].0);
        prop_assert_ne!(pairs[offset].1, flipped_pairs[offset].1);
    }

    // Features for pair i depend only on the prefix before i.
    #[test]
    fn features_ignore_the_future(
        pattern in prop::collection::vec(any::<bool>(), (WINDOW_MIN + 2)..40),
    ) {
        let logs = daily_log("u", "h", &pattern);
        let pairs = build_training_set(&logs);

        let truncated = &logs[..logs.len() - 1];
        let truncated_pairs = build_training_set(truncated);
        for (a, b) in truncated_pairs.iter().zip(pairs.iter()) {
            prop_assert_eq!(&a.0, &b.0);
            prop_assert_eq!(a.1, b.1);
        }
    }

    #[test]
    fn longer_streak_never_shrinks_the_streak_feature(n in 0usize..30) {
        let shorter = daily_log("u", "h", &vec![true; n]);
        let longer = daily_log("u", "h", &vec![true; n + 1]);
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        let a = current_features(&shorter, now).values[schema::STREAK];
        let b = current_features(&longer, now).values[schema::STREAK];
        prop_assert!(b >= a);
    }
}

#[test]
fn history_cap_keeps_features_stable_for_huge_logs() {
    // 1000 entries, only the most recent 200 participate.
    let mut pattern = vec![false; 800];
    pattern.extend(vec![true; 200]);
    let long = daily_log("u", "h", &pattern);
    let capped = daily_log("u", "h", &vec![true; 200]);

    let now = long.last().unwrap().timestamp + Duration::hours(5);
    let capped_now = capped.last().unwrap().timestamp + Duration::hours(5);

    let a = current_features(&long, now);
    let b = current_features(&capped, capped_now);
    assert_eq!(
        a.values[schema::OVERALL_RATE],
        b.values[schema::OVERALL_RATE]
    );
    assert_eq!(
        a.values[schema::OBSERVATION_COUNT],
        b.values[schema::OBSERVATION_COUNT]
    );
}
