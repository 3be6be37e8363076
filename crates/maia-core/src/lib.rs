//! # maia-core
//!
//! Deterministic biometric to consciousness-state classifier.
//!
//! A sample flows through five stages, left to right, with no feedback:
//!
//! 1. `normalize` - validate required fields, default and clamp the rest
//! 2. [`elemental`] - five bounded scores (fire, water, earth, air, aether)
//! 3. [`coherence`] - coherence in [0, 1] and autonomic balance in [-1, 1]
//! 4. [`presence`] - decision tree to a [`PresenceMode`]
//! 5. [`insights`] - fixed-table insight and recommendation strings
//!
//! [`classify`] composes them. Validation is the only failure mode.
//!
//! ## Example
//!
//! ```rust
//! use maia_core::{classify, RawBiometricSample};
//!
//! let raw = RawBiometricSample::new(72.0, 65.0, 1_700_000_000_000)
//!     .with_respiratory_rate(7.0)
//!     .with_stress_level(5.0);
//! let state = classify(&raw).unwrap();
//! assert!(state.coherence_level > 0.6);
//! ```

pub mod bands;
pub mod classifier;
pub mod coherence;
pub mod config;
pub mod domain;
pub mod elemental;
pub mod error;
pub mod history;
pub mod insights;
pub mod normalize;
pub mod presence;
pub mod trend;

#[cfg(test)]
pub mod tests_config;
#[cfg(test)]
pub mod tests_proptest;

pub use classifier::{classify, classify_sample, Classifier};
pub use coherence::{compute_autonomic_balance, compute_coherence};
pub use config::MaiaConfig;
pub use domain::{
    AutonomicBalance, BiometricSample, ConsciousnessState, Element, ElementalBalance,
    PresenceMode, RawBiometricSample, SleepStage, TimestampInput,
};
pub use elemental::compute_elemental_balance;
pub use error::{ConfigError, FieldIssue, IssueKind, ValidationError};
pub use history::{HistoryStore, InMemoryHistory};
pub use insights::{generate_insights, generate_recommendations};
pub use normalize::normalize;
pub use presence::classify_presence;
pub use trend::{summarize, TrendDirection, TrendSummary};
