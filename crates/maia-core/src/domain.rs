//! Domain types shared by every pipeline stage.
//!
//! Inputs arrive as [`RawBiometricSample`] (every field optional, JSON-shaped)
//! and leave the normalizer as an immutable [`BiometricSample`]. Everything
//! downstream is derived and immutable as well, ending in one
//! [`ConsciousnessState`] per sample.

use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Input
// ============================================================================

/// Sleep stage reported by the wearable, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SleepStage {
    Awake,
    Light,
    Deep,
    Rem,
}

impl SleepStage {
    /// Deep and REM sleep are the restorative stages that feed the water score.
    pub fn is_restorative(&self) -> bool {
        matches!(self, Self::Deep | Self::Rem)
    }
}

/// A biometric sample exactly as received from a caller.
///
/// Numeric fields use a lenient decoder: a present value that is not a JSON
/// number decodes to `Some(NaN)` so the normalizer can tell "missing" apart
/// from "not numeric". An unrecognised `sleepStage` decodes to `None`, like
/// any other unusable optional input. Decoding never fails on field values;
/// only malformed JSON is rejected here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBiometricSample {
    #[serde(default, deserialize_with = "lenient_number")]
    pub heart_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hrv: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub respiratory_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub oxygen_saturation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub stress_level: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub recovery_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient_sleep_stage")]
    pub sleep_stage: Option<SleepStage>,
    /// Body temperature in °F.
    #[serde(default, deserialize_with = "lenient_number")]
    pub body_temperature: Option<f64>,
    /// Epoch milliseconds.
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub timestamp: Option<TimestampInput>,
    #[serde(default)]
    pub source: Option<String>,
}

impl RawBiometricSample {
    /// Minimal sample carrying only the required fields.
    pub fn new(heart_rate: f64, hrv: f64, timestamp: i64) -> Self {
        Self {
            heart_rate: Some(heart_rate),
            hrv: Some(hrv),
            timestamp: Some(TimestampInput::Millis(timestamp)),
            ..Default::default()
        }
    }

    pub fn with_respiratory_rate(mut self, rate: f64) -> Self {
        self.respiratory_rate = Some(rate);
        self
    }

    pub fn with_oxygen_saturation(mut self, spo2: f64) -> Self {
        self.oxygen_saturation = Some(spo2);
        self
    }

    pub fn with_stress_level(mut self, stress: f64) -> Self {
        self.stress_level = Some(stress);
        self
    }

    pub fn with_recovery_score(mut self, recovery: f64) -> Self {
        self.recovery_score = Some(recovery);
        self
    }

    pub fn with_sleep_stage(mut self, stage: SleepStage) -> Self {
        self.sleep_stage = Some(stage);
        self
    }

    pub fn with_body_temperature(mut self, fahrenheit: f64) -> Self {
        self.body_temperature = Some(fahrenheit);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// Absent and `null` become `None`, numbers become `Some(x)`, anything else
/// becomes `Some(NaN)`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => Some(n.as_f64().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    })
}

/// A timestamp as it appeared on the wire.
///
/// JSON integers are kept exact; anything else is carried as `f64` so the
/// normalizer can accept integral floats and report the rest.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TimestampInput {
    Millis(i64),
    Other(f64),
}

/// Like [`lenient_number`], but integers that fit `i64` are never routed
/// through `f64`.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<TimestampInput>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::Number(n)) => Some(match n.as_i64() {
            Some(ms) => TimestampInput::Millis(ms),
            None => TimestampInput::Other(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Some(_) => Some(TimestampInput::Other(f64::NAN)),
    })
}

/// Known stages decode normally; anything else (unknown names, numbers,
/// objects) becomes `None`.
fn lenient_sleep_stage<'de, D>(deserializer: D) -> Result<Option<SleepStage>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(value) => {
            let stage = serde_json::from_value::<SleepStage>(value.clone()).ok();
            if stage.is_none() {
                log::debug!("ignoring unrecognised sleepStage {}", value);
            }
            stage
        }
    })
}

/// Canonical, validated biometric sample.
///
/// Fields are crate-private and there is no `Deserialize` impl, so outside
/// this crate [`crate::normalize::normalize`] is the only way to obtain one.
/// Every instance has finite fields, satisfies `heart_rate > 0` and
/// `hrv >= 0`, and has its percentage-like fields inside [0, 100].
///
/// ```compile_fail
/// let forged: maia_core::BiometricSample =
///     serde_json::from_str(r#"{"heartRate":-40,"hrv":-300}"#).unwrap();
/// ```
///
/// ```compile_fail
/// let forged = maia_core::BiometricSample {
///     heart_rate: -40.0,
///     hrv: f64::NAN,
///     respiratory_rate: 12.0,
///     oxygen_saturation: 500.0,
///     stress_level: -900.0,
///     recovery_score: None,
///     sleep_stage: None,
///     body_temperature: None,
///     timestamp: 0,
///     source: String::new(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSample {
    pub(crate) heart_rate: f64,
    pub(crate) hrv: f64,
    pub(crate) respiratory_rate: f64,
    pub(crate) oxygen_saturation: f64,
    pub(crate) stress_level: f64,
    pub(crate) recovery_score: Option<f64>,
    pub(crate) sleep_stage: Option<SleepStage>,
    pub(crate) body_temperature: Option<f64>,
    pub(crate) timestamp: i64,
    pub(crate) source: String,
}

impl BiometricSample {
    /// Beats per minute.
    pub fn heart_rate(&self) -> f64 {
        self.heart_rate
    }

    /// Milliseconds.
    pub fn hrv(&self) -> f64 {
        self.hrv
    }

    /// Breaths per minute.
    pub fn respiratory_rate(&self) -> f64 {
        self.respiratory_rate
    }

    /// Percent.
    pub fn oxygen_saturation(&self) -> f64 {
        self.oxygen_saturation
    }

    /// 0-100.
    pub fn stress_level(&self) -> f64 {
        self.stress_level
    }

    /// 0-100.
    pub fn recovery_score(&self) -> Option<f64> {
        self.recovery_score
    }

    pub fn sleep_stage(&self) -> Option<SleepStage> {
        self.sleep_stage
    }

    /// °F.
    pub fn body_temperature(&self) -> Option<f64> {
        self.body_temperature
    }

    /// Epoch milliseconds.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

// ============================================================================
// Elements
// ============================================================================

/// The five elements of the balance model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
    Aether,
}

impl Element {
    /// Fixed enumeration order. Used for arg-max tie-breaking (first wins)
    /// and for the ordering of generated insights.
    pub const ORDER: [Element; 5] = [
        Element::Fire,
        Element::Water,
        Element::Earth,
        Element::Air,
        Element::Aether,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fire => "fire",
            Self::Water => "water",
            Self::Earth => "earth",
            Self::Air => "air",
            Self::Aether => "aether",
        }
    }

    /// What the element stands for in the balance model.
    pub fn quality(&self) -> &'static str {
        match self {
            Self::Fire => "activation and vitality",
            Self::Water => "parasympathetic flow",
            Self::Earth => "grounding",
            Self::Air => "mental clarity",
            Self::Aether => "integration",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Self::Fire => 0,
            Self::Water => 1,
            Self::Earth => 2,
            Self::Air => 3,
            Self::Aether => 4,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Five independent bounded scores in [0, 100].
///
/// The fields do not sum to any fixed total; all five may be high (or low)
/// at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ElementalBalance {
    pub fire: f64,
    pub water: f64,
    pub earth: f64,
    pub air: f64,
    pub aether: f64,
}

impl ElementalBalance {
    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Air => self.air,
            Element::Aether => self.aether,
        }
    }

    /// Scores in [`Element::ORDER`].
    pub fn as_array(&self) -> [f64; 5] {
        [self.fire, self.water, self.earth, self.air, self.aether]
    }

    /// Arg-max over the five scores; ties go to the element that comes first
    /// in [`Element::ORDER`].
    pub fn dominant(&self) -> Element {
        let mut best = Element::ORDER[0];
        let mut best_score = self.get(best);
        for element in Element::ORDER.iter().skip(1) {
            let score = self.get(*element);
            if score > best_score {
                best = *element;
                best_score = score;
            }
        }
        best
    }
}

// ============================================================================
// Derived state
// ============================================================================

/// Sympathetic vs parasympathetic activation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AutonomicBalance {
    /// 0-100.
    pub sympathetic: f64,
    /// 0-100.
    pub parasympathetic: f64,
    /// `(parasympathetic - sympathetic) / 100`, in [-1, 1].
    pub balance: f64,
}

/// Recommended stance for a downstream conversational agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceMode {
    /// Active support.
    #[default]
    Dialogue,
    /// Receptive exploration.
    Patient,
    /// Witnessing and integration.
    Scribe,
}

impl PresenceMode {
    pub const ALL: [PresenceMode; 3] = [
        PresenceMode::Dialogue,
        PresenceMode::Patient,
        PresenceMode::Scribe,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dialogue => "dialogue",
            Self::Patient => "patient",
            Self::Scribe => "scribe",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Dialogue => "Active support - direct conversational guidance",
            Self::Patient => "Receptive - open-ended exploration",
            Self::Scribe => "Witnessing - reflect and integrate",
        }
    }
}

impl std::fmt::Display for PresenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Full classifier output for one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsciousnessState {
    pub elemental_balance: ElementalBalance,
    pub dominant_element: Element,
    /// [0, 1].
    pub coherence_level: f64,
    pub presence_mode: PresenceMode,
    pub autonomic_balance: AutonomicBalance,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
    /// Pass-through from the sample.
    pub timestamp: i64,
    /// Pass-through from the sample.
    pub source: String,
}
