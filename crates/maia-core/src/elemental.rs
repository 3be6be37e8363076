//! Elemental balance calculator.
//!
//! Each element is a weighted blend of two to four sub-terms, every sub-term
//! scored on [0, 100] and the blend clamped to [0, 100]. The constants below
//! are calibration values; changing them shifts classification outcomes.
//!
//! | element | terms |
//! |---------|-------|
//! | fire    | elevated heart rate, recovery, calm (inverse stress) |
//! | water   | HRV vs 80 ms ceiling, calm, restorative-sleep bonus |
//! | earth   | HRV stability (saturates at 30 ms), breathing 6-16/min, temperature near 98.6 °F |
//! | air     | breathing 8-14/min, SpO2 band, calm |
//! | aether  | physiological coherence, harmony of the other four, HRV above 50 ms |

use crate::bands::{band, clamp_score, ramp, saturate, variance};
use crate::coherence::physiological_coherence;
use crate::domain::{BiometricSample, ElementalBalance};

// Fire
const FIRE_HR_RANGE: (f64, f64) = (50.0, 120.0);
const FIRE_NEUTRAL_RECOVERY: f64 = 50.0;
const FIRE_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

// Water
const WATER_HRV_CEILING_MS: f64 = 80.0;
const WATER_SLEEP_BONUS: f64 = 15.0;
const WATER_WEIGHTS: [f64; 2] = [0.65, 0.35];

// Earth
const EARTH_HRV_STABLE_MS: f64 = 30.0;
const EARTH_BREATH_BAND: (f64, f64, f64) = (6.0, 16.0, 6.0);
const EARTH_TEMP_BAND_F: (f64, f64, f64) = (97.7, 99.5, 2.0);
const EARTH_WEIGHTS_WITH_TEMP: [f64; 3] = [0.45, 0.35, 0.20];
const EARTH_WEIGHTS_NO_TEMP: [f64; 2] = [0.55, 0.45];

// Air
const AIR_BREATH_BAND: (f64, f64, f64) = (8.0, 14.0, 4.0);
const AIR_SPO2_BAND: (f64, f64, f64) = (95.0, 100.0, 10.0);
const AIR_WEIGHTS: [f64; 3] = [0.4, 0.3, 0.3];

// Aether
/// Variance across the four base elements at which harmony reaches zero.
pub const HARMONY_VARIANCE_SCALE: f64 = 1000.0;
const AETHER_HRV_RAMP_MS: (f64, f64) = (20.0, 50.0);
const AETHER_WEIGHTS: [f64; 3] = [0.4, 0.35, 0.25];

/// Compute all five elemental scores for a sample.
pub fn compute_elemental_balance(sample: &BiometricSample) -> ElementalBalance {
    let fire = fire_score(sample);
    let water = water_score(sample);
    let earth = earth_score(sample);
    let air = air_score(sample);
    let aether = aether_score(sample, [fire, water, earth, air]);

    ElementalBalance {
        fire,
        water,
        earth,
        air,
        aether,
    }
}

#[inline]
fn calm(sample: &BiometricSample) -> f64 {
    100.0 - sample.stress_level
}

pub fn fire_score(sample: &BiometricSample) -> f64 {
    let activation = ramp(sample.heart_rate, FIRE_HR_RANGE.0, FIRE_HR_RANGE.1) * 100.0;
    let recovery = sample.recovery_score.unwrap_or(FIRE_NEUTRAL_RECOVERY);
    let [w_hr, w_rec, w_calm] = FIRE_WEIGHTS;
    clamp_score(w_hr * activation + w_rec * recovery + w_calm * calm(sample))
}

pub fn water_score(sample: &BiometricSample) -> f64 {
    let flow = saturate(sample.hrv, WATER_HRV_CEILING_MS) * 100.0;
    let sleep_bonus = match sample.sleep_stage {
        Some(stage) if stage.is_restorative() => WATER_SLEEP_BONUS,
        _ => 0.0,
    };
    let [w_hrv, w_calm] = WATER_WEIGHTS;
    clamp_score(w_hrv * flow + w_calm * calm(sample) + sleep_bonus)
}

pub fn earth_score(sample: &BiometricSample) -> f64 {
    let stability = saturate(sample.hrv, EARTH_HRV_STABLE_MS) * 100.0;
    let (lo, hi, falloff) = EARTH_BREATH_BAND;
    let breath = band(sample.respiratory_rate, lo, hi, falloff) * 100.0;

    let score = match sample.body_temperature {
        Some(temp) => {
            let (t_lo, t_hi, t_falloff) = EARTH_TEMP_BAND_F;
            let warmth = band(temp, t_lo, t_hi, t_falloff) * 100.0;
            let [w_stab, w_breath, w_temp] = EARTH_WEIGHTS_WITH_TEMP;
            w_stab * stability + w_breath * breath + w_temp * warmth
        }
        None => {
            let [w_stab, w_breath] = EARTH_WEIGHTS_NO_TEMP;
            w_stab * stability + w_breath * breath
        }
    };
    clamp_score(score)
}

pub fn air_score(sample: &BiometricSample) -> f64 {
    let (lo, hi, falloff) = AIR_BREATH_BAND;
    let breath = band(sample.respiratory_rate, lo, hi, falloff) * 100.0;
    let (s_lo, s_hi, s_falloff) = AIR_SPO2_BAND;
    let oxygen = band(sample.oxygen_saturation, s_lo, s_hi, s_falloff) * 100.0;
    let [w_breath, w_spo2, w_calm] = AIR_WEIGHTS;
    clamp_score(w_breath * breath + w_spo2 * oxygen + w_calm * calm(sample))
}

/// Aether depends on the other four scores through the harmony term.
pub fn aether_score(sample: &BiometricSample, base: [f64; 4]) -> f64 {
    let coherence = physiological_coherence(sample) * 100.0;
    let harmony = harmony(&base) * 100.0;
    let depth = ramp(sample.hrv, AETHER_HRV_RAMP_MS.0, AETHER_HRV_RAMP_MS.1) * 100.0;
    let [w_coh, w_harm, w_hrv] = AETHER_WEIGHTS;
    clamp_score(w_coh * coherence + w_harm * harmony + w_hrv * depth)
}

/// 1 for perfectly even scores, 0 once variance reaches
/// [`HARMONY_VARIANCE_SCALE`].
pub fn harmony(scores: &[f64]) -> f64 {
    (1.0 - variance(scores) / HARMONY_VARIANCE_SCALE).clamp(0.0, 1.0)
}
