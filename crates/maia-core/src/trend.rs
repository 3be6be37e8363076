//! Trend summaries over a window of past states.

use serde::{Deserialize, Serialize};

use crate::domain::{ConsciousnessState, Element, ElementalBalance, PresenceMode};

/// Minimum change in mean coherence between window halves to call a trend.
pub const COHERENCE_TREND_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Increasing,
    Stable,
    Decreasing,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementCount {
    pub element: Element,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeCount {
    pub mode: PresenceMode,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSummary {
    pub sample_count: usize,
    pub mean_coherence: f64,
    pub min_coherence: f64,
    pub max_coherence: f64,
    pub coherence_trend: TrendDirection,
    pub mean_elemental_balance: ElementalBalance,
    pub mean_autonomic_balance: f64,
    /// In [`Element::ORDER`].
    pub dominant_counts: Vec<ElementCount>,
    /// In [`PresenceMode::ALL`] order.
    pub mode_counts: Vec<ModeCount>,
    pub first_timestamp: Option<i64>,
    pub last_timestamp: Option<i64>,
}

impl TrendSummary {
    /// Element that was dominant most often; ties go to the earlier element
    /// in [`Element::ORDER`]. `None` for an empty window.
    pub fn most_frequent_element(&self) -> Option<Element> {
        let mut best: Option<ElementCount> = None;
        for entry in &self.dominant_counts {
            if entry.count > best.map(|b| b.count).unwrap_or(0) {
                best = Some(*entry);
            }
        }
        best.map(|b| b.element)
    }
}

/// Summarize states given oldest first.
pub fn summarize(states: &[ConsciousnessState]) -> TrendSummary {
    let n = states.len();

    let dominant_counts = Element::ORDER
        .into_iter()
        .map(|element| ElementCount {
            element,
            count: states.iter().filter(|s| s.dominant_element == element).count(),
        })
        .collect();
    let mode_counts = PresenceMode::ALL
        .into_iter()
        .map(|mode| ModeCount {
            mode,
            count: states.iter().filter(|s| s.presence_mode == mode).count(),
        })
        .collect();

    if n == 0 {
        return TrendSummary {
            sample_count: 0,
            mean_coherence: 0.0,
            min_coherence: 0.0,
            max_coherence: 0.0,
            coherence_trend: TrendDirection::Unknown,
            mean_elemental_balance: ElementalBalance::default(),
            mean_autonomic_balance: 0.0,
            dominant_counts,
            mode_counts,
            first_timestamp: None,
            last_timestamp: None,
        };
    }

    let coherence: Vec<f64> = states.iter().map(|s| s.coherence_level).collect();
    let count = n as f64;

    let mut sums = [0.0f64; 5];
    for state in states {
        for (acc, v) in sums.iter_mut().zip(state.elemental_balance.as_array()) {
            *acc += v;
        }
    }

    TrendSummary {
        sample_count: n,
        mean_coherence: coherence.iter().sum::<f64>() / count,
        min_coherence: coherence.iter().cloned().fold(f64::INFINITY, f64::min),
        max_coherence: coherence.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
        coherence_trend: compute_trend(&coherence, COHERENCE_TREND_THRESHOLD),
        mean_elemental_balance: ElementalBalance {
            fire: sums[0] / count,
            water: sums[1] / count,
            earth: sums[2] / count,
            air: sums[3] / count,
            aether: sums[4] / count,
        },
        mean_autonomic_balance: states
            .iter()
            .map(|s| s.autonomic_balance.balance)
            .sum::<f64>()
            / count,
        dominant_counts,
        mode_counts,
        first_timestamp: states.first().map(|s| s.timestamp),
        last_timestamp: states.last().map(|s| s.timestamp),
    }
}

/// Compare first-half and second-half means of `window`.
pub fn compute_trend(window: &[f64], threshold: f64) -> TrendDirection {
    if window.len() < 3 {
        return TrendDirection::Unknown;
    }

    let n = window.len();
    let first_half = window[..n / 2].iter().sum::<f64>() / (n / 2) as f64;
    let second_half = window[n / 2..].iter().sum::<f64>() / (n - n / 2) as f64;
    let change = second_half - first_half;

    if change > threshold {
        TrendDirection::Increasing
    } else if change < -threshold {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AutonomicBalance;
    use approx::assert_relative_eq;

    fn state(ts: i64, coherence: f64, dominant: Element, mode: PresenceMode) -> ConsciousnessState {
        ConsciousnessState {
            elemental_balance: ElementalBalance {
                fire: 10.0,
                water: 20.0,
                earth: 30.0,
                air: 40.0,
                aether: 50.0,
            },
            dominant_element: dominant,
            coherence_level: coherence,
            presence_mode: mode,
            autonomic_balance: AutonomicBalance {
                sympathetic: 0.0,
                parasympathetic: 0.0,
                balance: coherence - 0.5,
            },
            insights: vec![],
            recommendations: vec![],
            timestamp: ts,
            source: "test".into(),
        }
    }

    #[test]
    fn test_empty_window() {
        let summary = summarize(&[]);
        assert_eq!(summary.sample_count, 0);
        assert_eq!(summary.coherence_trend, TrendDirection::Unknown);
        assert_eq!(summary.most_frequent_element(), None);
        assert_eq!(summary.dominant_counts.len(), 5);
        assert_eq!(summary.mode_counts.len(), 3);
    }

    #[test]
    fn test_rising_coherence() {
        let states: Vec<_> = (0..6)
            .map(|i| state(i, 0.3 + 0.1 * i as f64, Element::Water, PresenceMode::Patient))
            .collect();
        let summary = summarize(&states);
        assert_eq!(summary.coherence_trend, TrendDirection::Increasing);
        assert_relative_eq!(summary.min_coherence, 0.3, epsilon = 1e-12);
        assert_relative_eq!(summary.max_coherence, 0.8, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_coherence, 0.55, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_autonomic_balance, 0.05, epsilon = 1e-12);
        assert_relative_eq!(summary.mean_elemental_balance.earth, 30.0, epsilon = 1e-12);
        assert_eq!(summary.first_timestamp, Some(0));
        assert_eq!(summary.last_timestamp, Some(5));
    }

    #[test]
    fn test_counts_and_most_frequent() {
        let states = vec![
            state(0, 0.5, Element::Earth, PresenceMode::Patient),
            state(1, 0.5, Element::Water, PresenceMode::Dialogue),
            state(2, 0.5, Element::Earth, PresenceMode::Patient),
            state(3, 0.5, Element::Water, PresenceMode::Scribe),
        ];
        let summary = summarize(&states);
        assert_eq!(summary.coherence_trend, TrendDirection::Stable);
        // Water and earth tie at two; water comes first in the fixed order.
        assert_eq!(summary.most_frequent_element(), Some(Element::Water));
        let patient = summary
            .mode_counts
            .iter()
            .find(|m| m.mode == PresenceMode::Patient)
            .unwrap();
        assert_eq!(patient.count, 2);
    }

    #[test]
    fn test_short_window_is_unknown() {
        assert_eq!(compute_trend(&[0.1, 0.9], 0.05), TrendDirection::Unknown);
        assert_eq!(compute_trend(&[0.9, 0.5, 0.1], 0.05), TrendDirection::Decreasing);
    }
}
