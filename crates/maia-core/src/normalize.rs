//! Normalizer: untrusted [`RawBiometricSample`] to canonical
//! [`BiometricSample`].
//!
//! - Required fields (`heartRate`, `hrv`, `timestamp`) are validated and
//!   every problem is reported in one [`ValidationError`].
//! - Optional fields get named defaults and are clamped, never rejected.

use crate::domain::{BiometricSample, RawBiometricSample, TimestampInput};
use crate::error::{FieldIssue, ValidationError};

pub const DEFAULT_RESPIRATORY_RATE: f64 = 12.0;
pub const DEFAULT_OXYGEN_SATURATION: f64 = 98.0;
pub const DEFAULT_STRESS_LEVEL: f64 = 0.0;
pub const DEFAULT_SOURCE: &str = "unknown";

const RESPIRATORY_RATE_MAX: f64 = 60.0;
const BODY_TEMPERATURE_RANGE_F: (f64, f64) = (80.0, 115.0);
/// 2^63; the first float past `i64::MAX`.
const TIMESTAMP_LIMIT: f64 = 9_223_372_036_854_775_808.0;
const TIMESTAMP_CONSTRAINT: &str = "a non-negative integer (epoch ms)";

/// Validate and default a raw sample.
pub fn normalize(raw: &RawBiometricSample) -> Result<BiometricSample, ValidationError> {
    let mut issues = Vec::new();

    let heart_rate = match raw.heart_rate {
        None => {
            issues.push(FieldIssue::missing("heartRate"));
            None
        }
        Some(v) if !v.is_finite() => {
            issues.push(FieldIssue::not_numeric("heartRate"));
            None
        }
        Some(v) if v <= 0.0 => {
            issues.push(FieldIssue::out_of_range("heartRate", "> 0"));
            None
        }
        Some(v) => Some(v),
    };

    let hrv = match raw.hrv {
        None => {
            issues.push(FieldIssue::missing("hrv"));
            None
        }
        Some(v) if !v.is_finite() => {
            issues.push(FieldIssue::not_numeric("hrv"));
            None
        }
        Some(v) if v < 0.0 => {
            issues.push(FieldIssue::out_of_range("hrv", ">= 0"));
            None
        }
        Some(v) => Some(v),
    };

    let timestamp = match raw.timestamp {
        None => {
            issues.push(FieldIssue::missing("timestamp"));
            None
        }
        Some(TimestampInput::Millis(ms)) if ms < 0 => {
            issues.push(FieldIssue::out_of_range("timestamp", TIMESTAMP_CONSTRAINT));
            None
        }
        Some(TimestampInput::Millis(ms)) => Some(ms),
        Some(TimestampInput::Other(v)) if !v.is_finite() => {
            issues.push(FieldIssue::not_numeric("timestamp"));
            None
        }
        Some(TimestampInput::Other(v)) if v < 0.0 || v.fract() != 0.0 || v >= TIMESTAMP_LIMIT => {
            issues.push(FieldIssue::out_of_range("timestamp", TIMESTAMP_CONSTRAINT));
            None
        }
        Some(TimestampInput::Other(v)) => Some(v as i64),
    };

    let (heart_rate, hrv, timestamp) = match (heart_rate, hrv, timestamp) {
        (Some(hr), Some(hrv), Some(ts)) if issues.is_empty() => (hr, hrv, ts),
        _ => return Err(ValidationError { issues }),
    };

    let source = raw
        .source
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_SOURCE)
        .to_string();

    Ok(BiometricSample {
        heart_rate,
        hrv,
        respiratory_rate: finite_or(raw.respiratory_rate, DEFAULT_RESPIRATORY_RATE)
            .clamp(0.0, RESPIRATORY_RATE_MAX),
        oxygen_saturation: finite_or(raw.oxygen_saturation, DEFAULT_OXYGEN_SATURATION)
            .clamp(0.0, 100.0),
        stress_level: finite_or(raw.stress_level, DEFAULT_STRESS_LEVEL).clamp(0.0, 100.0),
        recovery_score: finite(raw.recovery_score).map(|v| v.clamp(0.0, 100.0)),
        sleep_stage: raw.sleep_stage,
        body_temperature: finite(raw.body_temperature)
            .map(|v| v.clamp(BODY_TEMPERATURE_RANGE_F.0, BODY_TEMPERATURE_RANGE_F.1)),
        timestamp,
        source,
    })
}

#[inline]
fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[inline]
fn finite_or(value: Option<f64>, default: f64) -> f64 {
    finite(value).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SleepStage;
    use crate::error::IssueKind;

    #[test]
    fn test_defaults_applied() {
        let sample = normalize(&RawBiometricSample::new(70.0, 50.0, 1)).unwrap();
        assert_eq!(sample.respiratory_rate, DEFAULT_RESPIRATORY_RATE);
        assert_eq!(sample.oxygen_saturation, DEFAULT_OXYGEN_SATURATION);
        assert_eq!(sample.stress_level, DEFAULT_STRESS_LEVEL);
        assert_eq!(sample.recovery_score, None);
        assert_eq!(sample.sleep_stage, None);
        assert_eq!(sample.source, DEFAULT_SOURCE);
        assert_eq!(sample.timestamp, 1);
    }

    #[test]
    fn test_zero_heart_rate_rejected() {
        let err = normalize(&RawBiometricSample::new(0.0, 50.0, 1)).unwrap_err();
        assert_eq!(err.issues.len(), 1);
        assert_eq!(err.issues[0].field, "heartRate");
        assert_eq!(err.issues[0].kind, IssueKind::OutOfRange);
    }

    #[test]
    fn test_missing_heart_rate_rejected() {
        let raw = RawBiometricSample {
            hrv: Some(50.0),
            timestamp: Some(TimestampInput::Millis(1)),
            source: Some("x".into()),
            ..Default::default()
        };
        let err = normalize(&raw).unwrap_err();
        assert!(err.has_field("heartRate"));
        assert_eq!(err.issues[0].kind, IssueKind::Missing);
    }

    #[test]
    fn test_all_issues_reported_together() {
        let raw = RawBiometricSample {
            heart_rate: Some(f64::NAN),
            hrv: Some(-3.0),
            ..Default::default()
        };
        let err = normalize(&raw).unwrap_err();
        assert_eq!(err.fields(), vec!["heartRate", "hrv", "timestamp"]);
        assert_eq!(err.issues[0].kind, IssueKind::NotNumeric);
        assert_eq!(err.issues[1].kind, IssueKind::OutOfRange);
        assert_eq!(err.issues[2].kind, IssueKind::Missing);
    }

    fn with_timestamp(timestamp: TimestampInput) -> RawBiometricSample {
        RawBiometricSample {
            timestamp: Some(timestamp),
            ..RawBiometricSample::new(60.0, 40.0, 0)
        }
    }

    #[test]
    fn test_fractional_timestamp_rejected() {
        let raw = with_timestamp(TimestampInput::Other(1.5));
        assert!(normalize(&raw).unwrap_err().has_field("timestamp"));
    }

    #[test]
    fn test_integral_float_timestamp_accepted() {
        let sample = normalize(&with_timestamp(TimestampInput::Other(1_700_000_000_000.0))).unwrap();
        assert_eq!(sample.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_large_integer_timestamp_passes_through_exactly() {
        let sample = normalize(&with_timestamp(TimestampInput::Millis(9_007_199_254_740_993))).unwrap();
        assert_eq!(sample.timestamp(), 9_007_199_254_740_993);

        let sample = normalize(&with_timestamp(TimestampInput::Millis(i64::MAX))).unwrap();
        assert_eq!(sample.timestamp(), i64::MAX);
    }

    #[test]
    fn test_timestamp_outside_i64_rejected() {
        // 2^63 as a float must not saturate to i64::MAX.
        let err = normalize(&with_timestamp(TimestampInput::Other(TIMESTAMP_LIMIT))).unwrap_err();
        assert_eq!(err.issues[0].field, "timestamp");
        assert_eq!(err.issues[0].kind, IssueKind::OutOfRange);

        let err = normalize(&with_timestamp(TimestampInput::Millis(-1))).unwrap_err();
        assert_eq!(err.issues[0].kind, IssueKind::OutOfRange);

        let err = normalize(&with_timestamp(TimestampInput::Other(f64::NAN))).unwrap_err();
        assert_eq!(err.issues[0].kind, IssueKind::NotNumeric);
    }

    #[test]
    fn test_optional_fields_clamped() {
        let raw = RawBiometricSample::new(60.0, 40.0, 5)
            .with_oxygen_saturation(140.0)
            .with_stress_level(-20.0)
            .with_recovery_score(250.0)
            .with_respiratory_rate(-1.0)
            .with_body_temperature(200.0)
            .with_sleep_stage(SleepStage::Deep);
        let sample = normalize(&raw).unwrap();
        assert_eq!(sample.oxygen_saturation, 100.0);
        assert_eq!(sample.stress_level, 0.0);
        assert_eq!(sample.recovery_score, Some(100.0));
        assert_eq!(sample.respiratory_rate, 0.0);
        assert_eq!(sample.body_temperature, Some(115.0));
        assert_eq!(sample.sleep_stage, Some(SleepStage::Deep));
    }

    #[test]
    fn test_non_finite_optional_falls_back_to_default() {
        let raw = RawBiometricSample::new(60.0, 40.0, 5)
            .with_respiratory_rate(f64::NAN)
            .with_recovery_score(f64::INFINITY);
        let sample = normalize(&raw).unwrap();
        assert_eq!(sample.respiratory_rate, DEFAULT_RESPIRATORY_RATE);
        assert_eq!(sample.recovery_score, None);
    }

    #[test]
    fn test_blank_source_becomes_unknown() {
        let sample = normalize(&RawBiometricSample::new(60.0, 40.0, 5).with_source("   ")).unwrap();
        assert_eq!(sample.source, DEFAULT_SOURCE);
    }
}
