//! Piecewise-linear scoring helpers.
//!
//! Breathing rate, oxygen saturation and HRV are scored with an optimal
//! range and a linear falloff on either side, not monotonically. These
//! helpers are the only place that shape is written down.

/// Full credit (1.0) inside `[lo, hi]`, falling linearly to 0.0 at
/// `falloff` units outside either edge.
pub fn band(x: f64, lo: f64, hi: f64, falloff: f64) -> f64 {
    if x >= lo && x <= hi {
        return 1.0;
    }
    if falloff <= 0.0 {
        return 0.0;
    }
    let distance = if x < lo { lo - x } else { x - hi };
    (1.0 - distance / falloff).clamp(0.0, 1.0)
}

/// 0.0 at or below `start`, 1.0 at or above `end`, linear in between.
pub fn ramp(x: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if x >= end { 1.0 } else { 0.0 };
    }
    ((x - start) / (end - start)).clamp(0.0, 1.0)
}

/// `min(1, x / ceiling)`, floored at 0.
pub fn saturate(x: f64, ceiling: f64) -> f64 {
    if ceiling <= 0.0 {
        return 1.0;
    }
    (x / ceiling).clamp(0.0, 1.0)
}

/// Clamp to the [0, 100] score range.
#[inline]
pub fn clamp_score(x: f64) -> f64 {
    x.clamp(0.0, 100.0)
}

/// Clamp to [0, 1].
#[inline]
pub fn clamp_unit(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}
