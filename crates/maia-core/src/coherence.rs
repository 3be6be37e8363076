//! Coherence and autonomic balance estimation.
//!
//! Coherence is a weighted average of four sub-coherences, each in [0, 1]:
//!
//! ```text
//! coherence = 0.4 * hrv + 0.2 * breathing + 0.2 * elemental + 0.2 * autonomic
//! ```
//!
//! The aether score needs a coherence figure before the elemental balance is
//! complete, so [`physiological_coherence`] provides the same blend without
//! the elemental term.

use crate::bands::{band, clamp_unit, saturate, variance};
use crate::domain::{AutonomicBalance, BiometricSample, ElementalBalance};

pub const HRV_COHERENCE_CEILING_MS: f64 = 80.0;
/// Variance across the five elements at which elemental coherence hits 0.
pub const ELEMENTAL_VARIANCE_SCALE: f64 = 1000.0;

pub const WEIGHT_HRV: f64 = 0.4;
pub const WEIGHT_BREATHING: f64 = 0.2;
pub const WEIGHT_ELEMENTAL: f64 = 0.2;
pub const WEIGHT_AUTONOMIC: f64 = 0.2;

const AUTONOMIC_HR_BAND: (f64, f64, f64) = (55.0, 80.0, 40.0);
const AUTONOMIC_HRV_BAND: (f64, f64, f64) = (30.0, 100.0, 30.0);

const BASELINE_HR_BPM: f64 = 70.0;
const BASELINE_HRV_MS: f64 = 50.0;
const SYMPATHETIC_HR_GAIN: f64 = 1.5;
const SYMPATHETIC_STRESS_GAIN: f64 = 0.5;
const SYMPATHETIC_HRV_DEFICIT_GAIN: f64 = 0.8;
const PARASYMPATHETIC_HRV_GAIN: f64 = 1.0;
const PARASYMPATHETIC_HR_GAIN: f64 = 1.5;
const PARASYMPATHETIC_RECOVERY_GAIN: f64 = 0.4;

/// The four sub-coherences behind a coherence figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoherenceBreakdown {
    pub hrv: f64,
    pub breathing: f64,
    pub elemental: f64,
    pub autonomic: f64,
}

impl CoherenceBreakdown {
    pub fn compute(sample: &BiometricSample, elemental: &ElementalBalance) -> Self {
        Self {
            hrv: hrv_coherence(sample.hrv),
            breathing: breathing_coherence(sample.respiratory_rate),
            elemental: elemental_coherence(elemental),
            autonomic: autonomic_coherence(sample),
        }
    }

    pub fn weighted(&self) -> f64 {
        clamp_unit(
            WEIGHT_HRV * self.hrv
                + WEIGHT_BREATHING * self.breathing
                + WEIGHT_ELEMENTAL * self.elemental
                + WEIGHT_AUTONOMIC * self.autonomic,
        )
    }
}

/// Overall coherence in [0, 1].
pub fn compute_coherence(sample: &BiometricSample, elemental: &ElementalBalance) -> f64 {
    CoherenceBreakdown::compute(sample, elemental).weighted()
}

/// Coherence from body signals alone (HRV, breathing, autonomic), reweighted
/// to [0, 1].
pub fn physiological_coherence(sample: &BiometricSample) -> f64 {
    let total = WEIGHT_HRV + WEIGHT_BREATHING + WEIGHT_AUTONOMIC;
    clamp_unit(
        (WEIGHT_HRV * hrv_coherence(sample.hrv)
            + WEIGHT_BREATHING * breathing_coherence(sample.respiratory_rate)
            + WEIGHT_AUTONOMIC * autonomic_coherence(sample))
            / total,
    )
}

pub fn hrv_coherence(hrv_ms: f64) -> f64 {
    saturate(hrv_ms, HRV_COHERENCE_CEILING_MS)
}

/// Stepwise: resonance breathing (5-8/min) scores highest.
pub fn breathing_coherence(rate: f64) -> f64 {
    if rate < 5.0 {
        0.5
    } else if rate <= 8.0 {
        0.9
    } else if rate <= 10.0 {
        0.75
    } else if rate <= 12.0 {
        0.6
    } else if rate <= 16.0 {
        0.45
    } else {
        0.3
    }
}

pub fn elemental_coherence(elemental: &ElementalBalance) -> f64 {
    clamp_unit(1.0 - variance(&elemental.as_array()) / ELEMENTAL_VARIANCE_SCALE)
}

/// How mid-range heart rate and HRV are: neither stressed nor depressed.
pub fn autonomic_coherence(sample: &BiometricSample) -> f64 {
    let (hr_lo, hr_hi, hr_falloff) = AUTONOMIC_HR_BAND;
    let (hrv_lo, hrv_hi, hrv_falloff) = AUTONOMIC_HRV_BAND;
    let hr = band(sample.heart_rate, hr_lo, hr_hi, hr_falloff);
    let hrv = band(sample.hrv, hrv_lo, hrv_hi, hrv_falloff);
    (hr + hrv) / 2.0
}

/// Independently accumulated sympathetic and parasympathetic scores.
pub fn compute_autonomic_balance(sample: &BiometricSample) -> AutonomicBalance {
    let hr_above = (sample.heart_rate - BASELINE_HR_BPM).max(0.0);
    let hr_below = (BASELINE_HR_BPM - sample.heart_rate).max(0.0);
    let hrv_above = (sample.hrv - BASELINE_HRV_MS).max(0.0);
    let hrv_below = (BASELINE_HRV_MS - sample.hrv).max(0.0);

    let sympathetic = (SYMPATHETIC_HR_GAIN * hr_above
        + SYMPATHETIC_STRESS_GAIN * sample.stress_level
        + SYMPATHETIC_HRV_DEFICIT_GAIN * hrv_below)
        .clamp(0.0, 100.0);

    let parasympathetic = (PARASYMPATHETIC_HRV_GAIN * hrv_above
        + PARASYMPATHETIC_HR_GAIN * hr_below
        + PARASYMPATHETIC_RECOVERY_GAIN * sample.recovery_score.unwrap_or(0.0))
    .clamp(0.0, 100.0);

    AutonomicBalance {
        sympathetic,
        parasympathetic,
        balance: ((parasympathetic - sympathetic) / 100.0).clamp(-1.0, 1.0),
    }
}
