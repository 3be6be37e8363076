//! Insight and recommendation generation.
//!
//! Each element has a high band and a low band with element-specific
//! thresholds. A band maps to one fixed `(insight, recommendation)` pair in
//! [`ELEMENT_TABLE`]. Elements are visited in [`Element::ORDER`]; each one
//! contributes at most one pair, the high band being checked first.
//!
//! Autonomic balance (±0.3) and absolute HRV (>60 / <25 ms) append further
//! fixed lines after the elemental ones. Output is fully deterministic.

use crate::domain::{AutonomicBalance, BiometricSample, Element, ElementalBalance};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    High,
    Low,
}

/// One row of the lookup table.
#[derive(Debug, Clone, Copy)]
pub struct BandEntry {
    pub element: Element,
    pub band: Band,
    pub threshold: f64,
    pub insight: &'static str,
    pub recommendation: &'static str,
}

impl BandEntry {
    fn matches(&self, score: f64) -> bool {
        match self.band {
            Band::High => score > self.threshold,
            Band::Low => score < self.threshold,
        }
    }
}

pub static ELEMENT_TABLE: [BandEntry; 10] = [
    BandEntry {
        element: Element::Fire,
        band: Band::High,
        threshold: 80.0,
        insight: "Your fire energy is strong - vitality and drive are running high.",
        recommendation: "Channel this energy into focused action, then schedule a cool-down.",
    },
    BandEntry {
        element: Element::Fire,
        band: Band::Low,
        threshold: 30.0,
        insight: "Your fire is low - energy and motivation may feel depleted.",
        recommendation: "Try gentle movement or energizing breath to rekindle your vitality.",
    },
    BandEntry {
        element: Element::Water,
        band: Band::High,
        threshold: 75.0,
        insight: "Water is flowing - your body is in a receptive, restorative state.",
        recommendation: "Lean into reflection, journaling or emotional processing while you are open.",
    },
    BandEntry {
        element: Element::Water,
        band: Band::Low,
        threshold: 30.0,
        insight: "Water is low - emotional flow and recovery may be restricted.",
        recommendation: "Hydrate, soften your pace and try slow nasal breathing.",
    },
    BandEntry {
        element: Element::Earth,
        band: Band::High,
        threshold: 75.0,
        insight: "You are well grounded - stable rhythms support steady presence.",
        recommendation: "A good moment for practical planning and commitments.",
    },
    BandEntry {
        element: Element::Earth,
        band: Band::Low,
        threshold: 30.0,
        insight: "Grounding is low - you may feel scattered or unsettled.",
        recommendation: "Feel your feet on the floor and slow your breath to six per minute.",
    },
    BandEntry {
        element: Element::Air,
        band: Band::High,
        threshold: 75.0,
        insight: "Air is clear - mental clarity and oxygenation are strong.",
        recommendation: "Use this clarity for learning, writing or problem solving.",
    },
    BandEntry {
        element: Element::Air,
        band: Band::Low,
        threshold: 35.0,
        insight: "Air is thin - thinking may feel foggy or crowded.",
        recommendation: "Step outside for fresh air and a few minutes of steady breathing.",
    },
    BandEntry {
        element: Element::Aether,
        band: Band::High,
        threshold: 70.0,
        insight: "Aether is present - body and mind are moving as one integrated whole.",
        recommendation: "Rest in open awareness; this is fertile ground for integration.",
    },
    BandEntry {
        element: Element::Aether,
        band: Band::Low,
        threshold: 25.0,
        insight: "Integration is low - your systems are pulling in different directions.",
        recommendation: "Pause for a short coherence practice before your next task.",
    },
];

pub const AUTONOMIC_THRESHOLD: f64 = 0.3;
pub const HRV_HIGH_MS: f64 = 60.0;
pub const HRV_LOW_MS: f64 = 25.0;

const PARASYMPATHETIC_INSIGHT: &str =
    "Parasympathetic tone is leading - your nervous system is in rest-and-restore mode.";
const PARASYMPATHETIC_RECOMMENDATION: &str =
    "Protect this calm: keep stimulation low and let recovery continue.";
const SYMPATHETIC_INSIGHT: &str =
    "Sympathetic activation is elevated - your body is mobilized for action.";
const SYMPATHETIC_RECOMMENDATION: &str =
    "Lengthen your exhales (in for 4, out for 6-8) to shift toward calm.";
const HRV_HIGH_INSIGHT: &str = "High HRV shows strong adaptive capacity and resilience.";
const HRV_LOW_INSIGHT: &str = "Low HRV suggests accumulated strain on your system.";
const HRV_LOW_RECOMMENDATION: &str =
    "Prioritize sleep and keep exertion light until HRV recovers.";

/// The band that fires for an element, high checked before low.
pub fn matching_band(element: Element, score: f64) -> Option<&'static BandEntry> {
    ELEMENT_TABLE
        .iter()
        .filter(|entry| entry.element == element)
        .find(|entry| entry.matches(score))
}

fn elemental_entries(elemental: &ElementalBalance) -> impl Iterator<Item = &'static BandEntry> + '_ {
    Element::ORDER
        .into_iter()
        .filter_map(move |element| matching_band(element, elemental.get(element)))
}

pub fn generate_insights(
    elemental: &ElementalBalance,
    autonomic: &AutonomicBalance,
    sample: &BiometricSample,
) -> Vec<String> {
    let mut insights: Vec<String> = elemental_entries(elemental)
        .map(|entry| entry.insight.to_string())
        .collect();

    if autonomic.balance > AUTONOMIC_THRESHOLD {
        insights.push(PARASYMPATHETIC_INSIGHT.to_string());
    } else if autonomic.balance < -AUTONOMIC_THRESHOLD {
        insights.push(SYMPATHETIC_INSIGHT.to_string());
    }

    if sample.hrv > HRV_HIGH_MS {
        insights.push(HRV_HIGH_INSIGHT.to_string());
    } else if sample.hrv < HRV_LOW_MS {
        insights.push(HRV_LOW_INSIGHT.to_string());
    }

    insights
}

pub fn generate_recommendations(
    elemental: &ElementalBalance,
    autonomic: &AutonomicBalance,
    sample: &BiometricSample,
) -> Vec<String> {
    let mut recommendations: Vec<String> = elemental_entries(elemental)
        .map(|entry| entry.recommendation.to_string())
        .collect();

    if autonomic.balance > AUTONOMIC_THRESHOLD {
        recommendations.push(PARASYMPATHETIC_RECOMMENDATION.to_string());
    } else if autonomic.balance < -AUTONOMIC_THRESHOLD {
        recommendations.push(SYMPATHETIC_RECOMMENDATION.to_string());
    }

    if sample.hrv < HRV_LOW_MS {
        recommendations.push(HRV_LOW_RECOMMENDATION.to_string());
    }

    recommendations
}
