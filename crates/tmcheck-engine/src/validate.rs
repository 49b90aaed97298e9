use crate::extract::{extract_field, extract_numeric};
use crate::segment::{MarkerPattern, latest_block};
use tmcheck_types::{
    Bounds, LogDocument, Mode, Observation, RangeSpec, Status, TelemetryConfig, TmBlock,
    ValidationRecord,
};

/// A parameter to check, paired with the identifier that carries it and
/// whatever the policy compares it against.
#[derive(Debug, Clone, PartialEq)]
pub struct Target<E> {
    pub tm_id: Option<String>,
    pub parameter: String,
    pub expected: E,
}

/// Mode-specific comparison strategy plugged into [`Validator`].
///
/// A policy decides which parameters are checked and in what order, what
/// portion of the log a parameter is searched in, and how the extracted
/// value is judged.
pub trait ComparisonPolicy {
    /// Per-parameter expectation carried by each target.
    type Expected;

    /// The portion of the log a parameter is extracted from.
    type Scope<'a>
    where
        Self: 'a;

    fn mode(&self) -> Mode;

    /// Parameters to check, in report order.
    fn targets(&self, config: &TelemetryConfig) -> Vec<Target<Self::Expected>>;

    /// Build the search scope for an identifier. Built once per run of
    /// consecutive targets sharing an identifier.
    fn scope<'a>(&'a self, log: &'a LogDocument, tm_id: Option<&str>) -> Self::Scope<'a>;

    fn judge(
        &self,
        target: &Target<Self::Expected>,
        scope: &Self::Scope<'_>,
    ) -> (Observation, Status);
}

/// Range mode: numeric containment, searched over the whole log.
#[derive(Debug, Clone)]
pub struct RangePolicy {
    spec: RangeSpec,
}

impl RangePolicy {
    pub fn new(spec: RangeSpec) -> Self {
        Self { spec }
    }
}

impl ComparisonPolicy for RangePolicy {
    type Expected = Bounds;
    type Scope<'a> = &'a str;

    fn mode(&self) -> Mode {
        Mode::Range
    }

    // Every expectation yields a row, in expectation order.
    fn targets(&self, config: &TelemetryConfig) -> Vec<Target<Bounds>> {
        self.spec
            .iter()
            .map(|(parameter, expected)| Target {
                tm_id: config.identifier_for(parameter).map(str::to_string),
                parameter: parameter.to_string(),
                expected,
            })
            .collect()
    }

    fn scope<'a>(&'a self, log: &'a LogDocument, _tm_id: Option<&str>) -> &'a str {
        log.text()
    }

    fn judge(&self, target: &Target<Bounds>, scope: &&str) -> (Observation, Status) {
        let expected = target.expected;
        let actual = extract_numeric(scope, &target.parameter);
        let status = match actual {
            None => Status::NotPresent,
            Some(value) if expected.contains(value) => Status::Matched,
            Some(_) => Status::Mismatch,
        };

        (Observation::Range { actual, expected }, status)
    }
}

/// Reference mode: the latest block of each identifier in the test log is
/// compared field by field with the latest block in a golden log.
#[derive(Debug, Clone)]
pub struct ReferencePolicy {
    reference: LogDocument,
    marker: MarkerPattern,
}

impl ReferencePolicy {
    pub fn with_marker(reference: LogDocument, marker: MarkerPattern) -> Self {
        Self { reference, marker }
    }
}

/// Latest blocks for one identifier in the test and reference logs.
#[derive(Debug, Clone)]
pub struct BlockPair<'a> {
    pub test: TmBlock<'a>,
    pub reference: TmBlock<'a>,
}

impl ComparisonPolicy for ReferencePolicy {
    type Expected = ();
    type Scope<'a> = BlockPair<'a>;

    fn mode(&self) -> Mode {
        Mode::Reference
    }

    fn targets(&self, config: &TelemetryConfig) -> Vec<Target<()>> {
        config
            .entries()
            .iter()
            .flat_map(|entry| {
                entry.parameters.iter().map(|parameter| Target {
                    tm_id: Some(entry.id.clone()),
                    parameter: parameter.clone(),
                    expected: (),
                })
            })
            .collect()
    }

    fn scope<'a>(&'a self, log: &'a LogDocument, tm_id: Option<&str>) -> BlockPair<'a> {
        let tm_id = tm_id.unwrap_or_default();
        let pair = BlockPair {
            test: latest_block(log, tm_id, &self.marker),
            reference: latest_block(&self.reference, tm_id, &self.marker),
        };
        tracing::debug!(
            tm_id,
            test_lines = pair.test.len(),
            reference_lines = pair.reference.len(),
            "segmented latest blocks"
        );
        pair
    }

    // Absence on either side and a genuine mismatch both end in NoSuccess.
    fn judge(&self, target: &Target<()>, scope: &BlockPair<'_>) -> (Observation, Status) {
        let test_value = extract_field(&scope.test, &target.parameter);
        let reference_value = extract_field(&scope.reference, &target.parameter);

        let status = match (&test_value, &reference_value) {
            (Some(test), Some(reference)) if !test.is_empty() && test == reference => {
                Status::Success
            }
            _ => Status::NoSuccess,
        };

        (
            Observation::Reference {
                test_value,
                reference_value,
            },
            status,
        )
    }
}

/// Produces one [`ValidationRecord`] per target of its policy.
#[derive(Debug, Clone)]
pub struct Validator<'c, P> {
    config: &'c TelemetryConfig,
    policy: P,
}

impl<'c, P: ComparisonPolicy> Validator<'c, P> {
    pub fn new(config: &'c TelemetryConfig, policy: P) -> Self {
        Self { config, policy }
    }

    pub fn validate(&self, log: &LogDocument) -> Vec<ValidationRecord> {
        let targets = self.policy.targets(self.config);
        tracing::debug!(mode = %self.policy.mode(), targets = targets.len(), "validating");
        let mut records = Vec::with_capacity(targets.len());
        let mut current: Option<(Option<&str>, P::Scope<'_>)> = None;

        for target in &targets {
            let tm_id = target.tm_id.as_deref();
            let scope = match &mut current {
                Some((id, scope)) if *id == tm_id => scope,
                slot => &mut slot.insert((tm_id, self.policy.scope(log, tm_id))).1,
            };

            let (observation, status) = self.policy.judge(target, scope);
            tracing::debug!(
                tm_id = tm_id.unwrap_or("Unknown"),
                parameter = %target.parameter,
                %status,
                "validated parameter"
            );

            records.push(ValidationRecord {
                tm_id: target.tm_id.clone(),
                parameter: target.parameter.clone(),
                present: observation.actual().is_some(),
                observation,
                status,
            });
        }

        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn golden(reference: LogDocument) -> ReferencePolicy {
        ReferencePolicy::with_marker(reference, MarkerPattern::default())
    }

    fn config(json: &str) -> TelemetryConfig {
        TelemetryConfig::from_json_str(json).unwrap()
    }

    fn range(json: &str) -> RangePolicy {
        RangePolicy::new(RangeSpec::from_json_str(json).unwrap())
    }

    #[test]
    fn test_range_matched() {
        let config = config(r#"{"A1": ["Temp"]}"#);
        let validator = Validator::new(&config, range(r#"{"Temp": {"min": 10, "max": 20}}"#));
        let records = validator.validate(&LogDocument::from_text("...Temp 15.2..."));

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.tm_id.as_deref(), Some("A1"));
        assert_eq!(record.parameter, "Temp");
        assert!(record.present);
        assert_eq!(record.status, Status::Matched);
        assert!(matches!(
            record.observation,
            Observation::Range { actual: Some(v), .. } if v == 15.2
        ));
    }

    #[test]
    fn test_range_mismatch() {
        let config = config(r#"{"A1": ["Temp"]}"#);
        let validator = Validator::new(&config, range(r#"{"Temp": {"min": 10, "max": 20}}"#));
        let records = validator.validate(&LogDocument::from_text("...Temp 25.0..."));
        assert_eq!(records[0].status, Status::Mismatch);
    }

    #[test]
    fn test_range_boundaries_are_matched() {
        let config = config(r#"{"A1": ["Lo", "Hi"]}"#);
        let validator = Validator::new(
            &config,
            range(r#"{"Lo": {"min": 10, "max": 20}, "Hi": {"min": 10, "max": 20}}"#),
        );
        let records = validator.validate(&LogDocument::from_text("Lo 10\nHi 20.0\n"));
        assert!(records.iter().all(|r| r.status == Status::Matched));
    }

    #[test]
    fn test_range_not_present_and_unknown_id() {
        let config = config(r#"{"A1": ["Temp"]}"#);
        let validator = Validator::new(
            &config,
            range(r#"{"Temp": {"min": 10, "max": 20}, "Ibat": {"min": 0, "max": 2}}"#),
        );
        let records = validator.validate(&LogDocument::from_text("Volt 3.3\n"));

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, Status::NotPresent);
        assert!(!records[0].present);
        assert_eq!(records[1].parameter, "Ibat");
        assert_eq!(records[1].tm_id, None);
        assert_eq!(records[1].status, Status::NotPresent);
    }

    #[test]
    fn test_reference_success_and_mismatch() {
        let config = config(r#"{"A1": ["Voltage"]}"#);
        let test_log = LogDocument::from_text("Received TM Id:- A1\nVoltage: 3.3\n");

        let same = golden(LogDocument::from_text(
            "Received TM Id:- A1\nVoltage: 3.3\n",
        ));
        let records = Validator::new(&config, same).validate(&test_log);
        assert_eq!(records[0].status, Status::Success);

        let different = golden(LogDocument::from_text(
            "Received TM Id:- A1\nVoltage: 3.4\n",
        ));
        let records = Validator::new(&config, different).validate(&test_log);
        assert_eq!(records[0].status, Status::NoSuccess);
        assert_eq!(
            records[0].observation,
            Observation::Reference {
                test_value: Some("3.3".to_string()),
                reference_value: Some("3.4".to_string()),
            }
        );
    }

    #[test]
    fn test_reference_absent_identifier_is_no_success() {
        let config = config(r#"{"B2": ["Mode", "Count"]}"#);
        let log = LogDocument::from_text("Received TM Id:- A1\nMode: SAFE\n");
        let policy = golden(log.clone());
        let records = Validator::new(&config, policy).validate(&log);

        assert_eq!(records.len(), 2);
        for record in &records {
            assert_eq!(record.status, Status::NoSuccess);
            assert!(!record.present);
        }
    }

    #[test]
    fn test_reference_uses_latest_block_only() {
        let config = config(r#"{"A1": ["Voltage"]}"#);
        let test_log = LogDocument::from_text(
            "Received TM Id:- A1\nVoltage: 3.3\nReceived TM Id:- A1\nVoltage: 3.5\n",
        );
        let reference = LogDocument::from_text("Received TM Id:- A1\nVoltage: 3.5\n");
        let records = Validator::new(&config, golden(reference)).validate(&test_log);
        assert_eq!(records[0].status, Status::Success);
    }

    #[test]
    fn test_reference_rows_follow_config_order() {
        let config = config(r#"{"Z9": ["b", "a"], "A1": ["c"]}"#);
        let log = LogDocument::default();
        let validator = Validator::new(&config, golden(log.clone()));
        let order: Vec<(String, String)> = validator
            .validate(&log)
            .into_iter()
            .map(|r| (r.tm_id.unwrap_or_default(), r.parameter))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Z9".to_string(), "b".to_string()),
                ("Z9".to_string(), "a".to_string()),
                ("A1".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn test_marker_for_longer_identifier_opens_block() {
        let config = config(r#"{"1": ["X"]}"#);
        let log = LogDocument::from_text("Received TM Id:- 1A\nX: 5\n");
        let records =
            Validator::new(&config, golden(log.clone())).validate(&log);
        assert_eq!(records[0].status, Status::Success);
    }
}
