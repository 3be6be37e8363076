use proptest::prelude::*;

/// Property-based checks for the classifier's determinism, bounds and
/// totality over arbitrary valid samples.

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use crate::domain::{PresenceMode, RawBiometricSample, SleepStage, TimestampInput};
    use crate::elemental::water_score;
    use crate::normalize::normalize;

    fn sleep_stage() -> impl Strategy<Value = Option<SleepStage>> {
        prop_oneof![
            Just(None),
            Just(Some(SleepStage::Awake)),
            Just(Some(SleepStage::Light)),
            Just(Some(SleepStage::Deep)),
            Just(Some(SleepStage::Rem)),
        ]
    }

    prop_compose! {
        fn raw_sample()(
            heart_rate in 1.0f64..250.0,
            hrv in 0.0f64..300.0,
            respiratory_rate in proptest::option::of(-10.0f64..80.0),
            oxygen_saturation in proptest::option::of(-20.0f64..140.0),
            stress_level in proptest::option::of(-50.0f64..200.0),
            recovery_score in proptest::option::of(-50.0f64..200.0),
            body_temperature in proptest::option::of(60.0f64..130.0),
            sleep_stage in sleep_stage(),
            timestamp in 0i64..4_000_000_000_000,
        ) -> RawBiometricSample {
            RawBiometricSample {
                heart_rate: Some(heart_rate),
                hrv: Some(hrv),
                respiratory_rate,
                oxygen_saturation,
                stress_level,
                recovery_score,
                sleep_stage,
                body_temperature,
                timestamp: Some(TimestampInput::Millis(timestamp)),
                source: Some("proptest".to_string()),
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        #[test]
        fn test_classify_is_deterministic(raw in raw_sample()) {
            let a = classify(&raw).unwrap();
            let b = classify(&raw).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn test_outputs_are_bounded(raw in raw_sample()) {
            let state = classify(&raw).unwrap();
            for v in state.elemental_balance.as_array() {
                prop_assert!((0.0..=100.0).contains(&v), "element out of range: {}", v);
            }
            prop_assert!((0.0..=1.0).contains(&state.coherence_level));
            let ab = state.autonomic_balance;
            prop_assert!((-1.0..=1.0).contains(&ab.balance));
            prop_assert!((0.0..=100.0).contains(&ab.sympathetic));
            prop_assert!((0.0..=100.0).contains(&ab.parasympathetic));
        }

        #[test]
        fn test_presence_is_total(raw in raw_sample()) {
            let state = classify(&raw).unwrap();
            prop_assert!(PresenceMode::ALL.contains(&state.presence_mode));
        }

        #[test]
        fn test_dominant_is_an_argmax(raw in raw_sample()) {
            let state = classify(&raw).unwrap();
            let max = state
                .elemental_balance
                .as_array()
                .into_iter()
                .fold(f64::NEG_INFINITY, f64::max);
            prop_assert_eq!(state.elemental_balance.get(state.dominant_element), max);
        }

        #[test]
        fn test_water_non_decreasing_in_hrv(
            raw in raw_sample(),
            lo in 10.0f64..90.0,
            delta in 0.0f64..80.0,
        ) {
            let hi = (lo + delta).min(90.0);
            let low = normalize(&RawBiometricSample { hrv: Some(lo), ..raw.clone() }).unwrap();
            let high = normalize(&RawBiometricSample { hrv: Some(hi), ..raw }).unwrap();
            prop_assert!(water_score(&high) >= water_score(&low));
        }

        #[test]
        fn test_non_finite_optionals_never_reach_scores(
            raw in raw_sample(),
            respiratory_rate in proptest::num::f64::ANY,
            oxygen_saturation in proptest::num::f64::ANY,
            stress_level in proptest::num::f64::ANY,
            recovery_score in proptest::num::f64::ANY,
            body_temperature in proptest::num::f64::ANY,
        ) {
            let raw = RawBiometricSample {
                respiratory_rate: Some(respiratory_rate),
                oxygen_saturation: Some(oxygen_saturation),
                stress_level: Some(stress_level),
                recovery_score: Some(recovery_score),
                body_temperature: Some(body_temperature),
                ..raw
            };
            let state = classify(&raw).unwrap();
            for v in state.elemental_balance.as_array() {
                prop_assert!((0.0..=100.0).contains(&v), "element out of range: {}", v);
            }
            prop_assert!((0.0..=1.0).contains(&state.coherence_level));
        }

        #[test]
        fn test_non_positive_heart_rate_rejected(
            raw in raw_sample(),
            heart_rate in -100.0f64..=0.0,
        ) {
            let raw = RawBiometricSample { heart_rate: Some(heart_rate), ..raw };
            let err = classify(&raw).unwrap_err();
            prop_assert!(err.has_field("heartRate"));
        }
    }
}
