use crate::expected::Bounds;
use serde::Serialize;
use std::fmt;

/// Comparison policy used for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Numeric containment within declared bounds
    Range,
    /// Textual equality against a golden reference log
    Reference,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Range => write!(f, "range"),
            Mode::Reference => write!(f, "reference"),
        }
    }
}

/// Terminal verdict for one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Status {
    #[serde(rename = "MATCHED")]
    Matched,
    #[serde(rename = "MISMATCH")]
    Mismatch,
    #[serde(rename = "NOT PRESENT")]
    NotPresent,
    #[serde(rename = "Success")]
    Success,
    #[serde(rename = "No Success")]
    NoSuccess,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Matched => "MATCHED",
            Status::Mismatch => "MISMATCH",
            Status::NotPresent => "NOT PRESENT",
            Status::Success => "Success",
            Status::NoSuccess => "No Success",
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Status::Matched | Status::Success)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value extracted for one parameter in one context.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Numeric(f64),
    Text(String),
}

/// What was observed for a parameter, shaped by the comparison mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Observation {
    Range {
        actual: Option<f64>,
        expected: Bounds,
    },
    Reference {
        test_value: Option<String>,
        reference_value: Option<String>,
    },
}

impl Observation {
    /// Value extracted from the log under test, if any.
    pub fn actual(&self) -> Option<ParameterValue> {
        match self {
            Observation::Range { actual, .. } => actual.map(ParameterValue::Numeric),
            Observation::Reference { test_value, .. } => {
                test_value.clone().map(ParameterValue::Text)
            }
        }
    }
}

/// One report row: the verdict for an (identifier, parameter) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationRecord {
    /// `None` when no configured identifier carries the parameter.
    pub tm_id: Option<String>,
    pub parameter: String,
    pub present: bool,
    pub observation: Observation,
    pub status: Status,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::NotPresent.to_string(), "NOT PRESENT");
        assert_eq!(Status::NoSuccess.to_string(), "No Success");
        assert!(Status::Matched.is_pass());
        assert!(!Status::Mismatch.is_pass());
    }

    #[test]
    fn test_record_serializes_flat_status() {
        let record = ValidationRecord {
            tm_id: Some("A1".to_string()),
            parameter: "Temp".to_string(),
            present: true,
            observation: Observation::Range {
                actual: Some(15.2),
                expected: Bounds::new(10.0, 20.0),
            },
            status: Status::Matched,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "MATCHED");
        assert_eq!(json["observation"]["mode"], "range");
        assert_eq!(json["observation"]["actual"], 15.2);
        assert_eq!(json["observation"]["expected"]["max"], 20.0);
    }

    #[test]
    fn test_observation_actual() {
        let observation = Observation::Reference {
            test_value: Some("3.3".to_string()),
            reference_value: None,
        };
        assert_eq!(
            observation.actual(),
            Some(ParameterValue::Text("3.3".to_string()))
        );
    }
}
