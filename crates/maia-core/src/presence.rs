//! Presence-mode classifier.
//!
//! A fixed decision tree over coherence, elemental scores and stress. Rules
//! are evaluated in priority order and the first match wins:
//!
//! ```text
//! [coherence > 0.75 AND aether > 70]
//!     YES → Scribe
//!     NO  → [(coherence > 0.4 AND water > 60) OR (earth > 65 AND stress < 40)]
//!         YES → Patient
//!         NO  → Dialogue
//! ```
//!
//! Every path ends in a leaf, so the classifier is total.

use crate::domain::{BiometricSample, Element, ElementalBalance, PresenceMode};

pub const SCRIBE_COHERENCE: f64 = 0.75;
pub const SCRIBE_AETHER: f64 = 70.0;
pub const PATIENT_COHERENCE: f64 = 0.4;
pub const PATIENT_WATER: f64 = 60.0;
pub const PATIENT_EARTH: f64 = 65.0;
pub const PATIENT_STRESS_CEILING: f64 = 40.0;

/// Inputs the tree looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PresenceContext {
    pub coherence: f64,
    pub elemental: ElementalBalance,
    pub stress_level: f64,
}

impl PresenceContext {
    pub fn new(coherence: f64, elemental: ElementalBalance, sample: &BiometricSample) -> Self {
        Self {
            coherence,
            elemental,
            stress_level: sample.stress_level,
        }
    }
}

/// Conditions for branching. All comparisons are strict.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    CoherenceAbove(f64),
    ElementAbove(Element, f64),
    StressBelow(f64),
    All(Vec<Condition>),
    Any(Vec<Condition>),
}

impl Condition {
    pub fn evaluate(&self, ctx: &PresenceContext) -> bool {
        match self {
            Condition::CoherenceAbove(threshold) => ctx.coherence > *threshold,
            Condition::ElementAbove(element, threshold) => ctx.elemental.get(*element) > *threshold,
            Condition::StressBelow(threshold) => ctx.stress_level < *threshold,
            Condition::All(conditions) => conditions.iter().all(|c| c.evaluate(ctx)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.evaluate(ctx)),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DecisionNode {
    Branch {
        condition: Condition,
        if_true: Box<DecisionNode>,
        if_false: Box<DecisionNode>,
    },
    Leaf(PresenceMode),
}

/// Result of walking the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceDecision {
    pub mode: PresenceMode,
    /// Conditions visited, for debug logging.
    pub path: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct PresenceTree {
    root: DecisionNode,
}

impl PresenceTree {
    pub fn new(root: DecisionNode) -> Self {
        Self { root }
    }

    /// The calibrated tree described in the module docs.
    pub fn standard() -> Self {
        use Condition::*;
        use DecisionNode::*;

        Self::new(Branch {
            condition: All(vec![
                CoherenceAbove(SCRIBE_COHERENCE),
                ElementAbove(Element::Aether, SCRIBE_AETHER),
            ]),
            if_true: Box::new(Leaf(PresenceMode::Scribe)),
            if_false: Box::new(Branch {
                condition: Any(vec![
                    All(vec![
                        CoherenceAbove(PATIENT_COHERENCE),
                        ElementAbove(Element::Water, PATIENT_WATER),
                    ]),
                    All(vec![
                        ElementAbove(Element::Earth, PATIENT_EARTH),
                        StressBelow(PATIENT_STRESS_CEILING),
                    ]),
                ]),
                if_true: Box::new(Leaf(PresenceMode::Patient)),
                if_false: Box::new(Leaf(PresenceMode::Dialogue)),
            }),
        })
    }

    pub fn decide(&self, ctx: &PresenceContext) -> PresenceDecision {
        let mut path = Vec::new();
        let mut node = &self.root;
        loop {
            match node {
                DecisionNode::Branch {
                    condition,
                    if_true,
                    if_false,
                } => {
                    let result = condition.evaluate(ctx);
                    path.push(format!("{:?} = {}", condition, result));
                    node = if result { &**if_true } else { &**if_false };
                }
                DecisionNode::Leaf(mode) => {
                    return PresenceDecision { mode: *mode, path };
                }
            }
        }
    }
}

impl Default for PresenceTree {
    fn default() -> Self {
        Self::standard()
    }
}

/// Classify with the standard tree.
pub fn classify_presence(
    coherence: f64,
    elemental: &ElementalBalance,
    sample: &BiometricSample,
) -> PresenceMode {
    PresenceTree::standard()
        .decide(&PresenceContext::new(coherence, *elemental, sample))
        .mode
}
