//! Pipeline orchestration.
//!
//! ```text
//! RawBiometricSample
//!   → normalize              (only failure point)
//!   → elemental balance
//!   → coherence + autonomic balance
//!   → presence mode
//!   → insights + recommendations
//!   → ConsciousnessState
//! ```
//!
//! [`classify`] is pure. [`Classifier`] wraps it and additionally records
//! each result into an optional [`HistoryStore`].

use std::sync::Arc;

use crate::coherence::{compute_autonomic_balance, CoherenceBreakdown};
use crate::domain::{BiometricSample, ConsciousnessState, RawBiometricSample};
use crate::elemental::compute_elemental_balance;
use crate::error::ValidationError;
use crate::history::HistoryStore;
use crate::insights::{generate_insights, generate_recommendations};
use crate::normalize::normalize;
use crate::presence::{PresenceContext, PresenceTree};
use crate::trend::{summarize, TrendSummary};

/// Validate a raw sample and run the full pipeline.
///
/// A validation failure short-circuits: no later stage runs.
pub fn classify(raw: &RawBiometricSample) -> Result<ConsciousnessState, ValidationError> {
    let sample = normalize(raw).map_err(|err| {
        log::warn!("rejected biometric sample: {}", err);
        err
    })?;
    Ok(classify_sample(&sample))
}

/// Run stages 2-5 on an already validated sample. Total.
pub fn classify_sample(sample: &BiometricSample) -> ConsciousnessState {
    let elemental = compute_elemental_balance(sample);
    let breakdown = CoherenceBreakdown::compute(sample, &elemental);
    let coherence = breakdown.weighted();
    let autonomic = compute_autonomic_balance(sample);

    let decision = PresenceTree::standard().decide(&PresenceContext::new(coherence, elemental, sample));

    let insights = generate_insights(&elemental, &autonomic, sample);
    let recommendations = generate_recommendations(&elemental, &autonomic, sample);
    let dominant = elemental.dominant();

    log::debug!(
        "classified sample ts={} source={}: dominant={} coherence={:.3} (hrv={:.2} breath={:.2} elem={:.2} auto={:.2}) mode={} path={:?}",
        sample.timestamp,
        sample.source,
        dominant,
        coherence,
        breakdown.hrv,
        breakdown.breathing,
        breakdown.elemental,
        breakdown.autonomic,
        decision.mode,
        decision.path
    );

    ConsciousnessState {
        elemental_balance: elemental,
        dominant_element: dominant,
        coherence_level: coherence,
        presence_mode: decision.mode,
        autonomic_balance: autonomic,
        insights,
        recommendations,
        timestamp: sample.timestamp,
        source: sample.source.clone(),
    }
}

/// Classifier service with an optional history side channel.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    history: Option<Arc<dyn HistoryStore>>,
}

impl Classifier {
    pub fn new(history: Option<Arc<dyn HistoryStore>>) -> Self {
        Self { history }
    }

    pub fn with_history(history: Arc<dyn HistoryStore>) -> Self {
        Self::new(Some(history))
    }

    pub fn history(&self) -> Option<&Arc<dyn HistoryStore>> {
        self.history.as_ref()
    }

    /// Classify and, on success, append to history.
    pub fn process(&self, raw: &RawBiometricSample) -> Result<ConsciousnessState, ValidationError> {
        let state = classify(raw)?;
        if let Some(history) = &self.history {
            history.append(state.clone());
        }
        Ok(state)
    }

    /// Up to `n` most recent states, oldest first. Empty without history.
    pub fn recent(&self, n: usize) -> Vec<ConsciousnessState> {
        self.history
            .as_ref()
            .map(|h| h.recent(n))
            .unwrap_or_default()
    }

    /// Trend over the `n` most recent states.
    pub fn trend(&self, n: usize) -> TrendSummary {
        summarize(&self.recent(n))
    }
}
