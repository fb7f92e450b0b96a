//! Property tests for window eviction, duplicate handling and accumulation

use proptest::prelude::*;

use rainguard_core::history::accumulated_delta;
use rainguard_core::{DuplicatePolicy, FixedClock, Sample, SampleWindow, SensorHistory};

const NOW: i64 = 1_700_000_000;

/// Time-ordered readings: (counter value in tenths, gap in seconds)
fn ordered_readings() -> impl Strategy<Value = Vec<(u16, i64)>> {
    prop::collection::vec((0u16..500, 0i64..300), 0..64)
}

fn policy() -> impl Strategy<Value = DuplicatePolicy> {
    prop_oneof![
        Just(DuplicatePolicy::RequireBothChanged),
        Just(DuplicatePolicy::RejectExactRepeat),
    ]
}

proptest! {
    #[test]
    fn nothing_older_than_window_survives(
        readings in ordered_readings(),
        minutes in 1i64..30,
        policy in policy(),
    ) {
        let mut clock = FixedClock::new(NOW);
        let mut history = SensorHistory::new(minutes, &mut clock).with_policy(policy);

        let mut ts = NOW - 3_600;
        for (tenths, gap) in readings {
            ts += gap;
            history.add_measurement(tenths as f64 / 10.0, ts);
        }

        let cutoff = NOW - minutes * 60;
        prop_assert!(history.iter().all(|s| s.timestamp >= cutoff));
    }

    #[test]
    fn exact_repeat_never_grows_history(
        readings in ordered_readings(),
        policy in policy(),
    ) {
        let mut history = SensorHistory::new(120, FixedClock::new(NOW)).with_policy(policy);

        let mut ts = NOW - 3_600;
        for (tenths, gap) in readings {
            ts += gap;
            history.add_measurement(tenths as f64 / 10.0, ts);
        }

        if let (_, Some(last)) = history.oldest_and_newest() {
            let before = history.len();
            prop_assert!(!history.add_measurement(last.value, last.timestamp));
            prop_assert_eq!(history.len(), before);
        }
    }

    #[test]
    fn single_field_change_follows_policy(
        value in 0.1f64..100.0,
        ts in (NOW - 60)..NOW,
        bump in 1i64..30,
    ) {
        for policy in [DuplicatePolicy::RequireBothChanged, DuplicatePolicy::RejectExactRepeat] {
            let mut only_time = SampleWindow::new(60).with_policy(policy);
            prop_assert!(only_time.add_measurement_at(value, ts, NOW));
            let stored_ts = only_time.add_measurement_at(value, ts + bump, NOW);

            let mut only_value = SampleWindow::new(60).with_policy(policy);
            prop_assert!(only_value.add_measurement_at(value, ts, NOW));
            let stored_value = only_value.add_measurement_at(value + 1.0, ts, NOW);

            let expected = policy == DuplicatePolicy::RejectExactRepeat;
            prop_assert_eq!(stored_ts, expected);
            prop_assert_eq!(stored_value, expected);
            prop_assert_eq!(only_time.len(), if expected { 2 } else { 1 });
        }
    }

    #[test]
    fn rain_amount_is_non_negative_and_rounded(values in prop::collection::vec(0.0f64..1_000.0, 0..64)) {
        let samples: Vec<Sample> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(v, i as i64))
            .collect();

        let amount = accumulated_delta(&samples);
        prop_assert!(amount >= 0.0);
        prop_assert!(((amount * 100.0).round() - amount * 100.0).abs() < 1e-6);
    }

    #[test]
    fn monotonic_counter_accumulates_span(mut tenths in prop::collection::vec(0u32..10_000, 2..64)) {
        tenths.sort_unstable();
        let samples: Vec<Sample> = tenths
            .iter()
            .enumerate()
            .map(|(i, &t)| Sample::new(t as f64 / 10.0, i as i64))
            .collect();

        let first = samples[0].value;
        let last = samples[samples.len() - 1].value;
        let expected = ((last - first) * 100.0).round() / 100.0;
        prop_assert!((accumulated_delta(&samples) - expected).abs() < 1e-9);
    }
}
