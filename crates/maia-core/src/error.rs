use serde::Serialize;
use thiserror::Error;

/// What is wrong with a single input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    Missing,
    NotNumeric,
    OutOfRange,
}

/// One offending input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// Wire name of the field, e.g. `heartRate`.
    pub field: &'static str,
    pub kind: IssueKind,
    pub message: String,
}

impl FieldIssue {
    pub fn missing(field: &'static str) -> Self {
        Self {
            field,
            kind: IssueKind::Missing,
            message: format!("{field} is required"),
        }
    }

    pub fn not_numeric(field: &'static str) -> Self {
        Self {
            field,
            kind: IssueKind::NotNumeric,
            message: format!("{field} must be a finite number"),
        }
    }

    pub fn out_of_range(field: &'static str, constraint: &str) -> Self {
        Self {
            field,
            kind: IssueKind::OutOfRange,
            message: format!("{field} must be {constraint}"),
        }
    }
}

impl std::fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// The only failure the pipeline can produce: the sample did not pass the
/// normalizer. Carries every offending field, never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid biometric sample: {}", join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&'static str> {
        self.issues.iter().map(|i| i.field).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_lists_every_field() {
        let err = ValidationError {
            issues: vec![
                FieldIssue::missing("heartRate"),
                FieldIssue::out_of_range("hrv", ">= 0"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("heartRate is required"));
        assert!(msg.contains("hrv must be >= 0"));
        assert_eq!(err.fields(), vec!["heartRate", "hrv"]);
        assert!(err.has_field("hrv"));
        assert!(!err.has_field("timestamp"));
    }
}
