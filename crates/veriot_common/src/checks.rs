//! Named checks and diagnostics produced by the rule sets.
//!
//! Each category declares a fixed set of named boolean checks. Rule sets must
//! keep a check's boolean and its diagnostics in sync: clearing a check and
//! recording the reason happen through one call (`fail`), never separately.
//! Severity is attached when a diagnostic is created - the aggregator never
//! infers it from message text.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of check names across all categories.
///
/// Categories declare different subsets; a name absent from a result is
/// vacuously true for the aggregator. Several names are always-pass
/// placeholders kept for response-shape stability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckName {
    #[serde(rename = "syntax_check")]
    Syntax,
    #[serde(rename = "protocol_check")]
    Protocol,
    #[serde(rename = "data_format_check")]
    DataFormat,
    #[serde(rename = "security_check")]
    SecurityConfig,
    #[serde(rename = "control_check")]
    Control,
    #[serde(rename = "safety_check")]
    Safety,
    #[serde(rename = "device_management_check")]
    DeviceManagement,
    #[serde(rename = "qos_check")]
    Qos,
    #[serde(rename = "authentication_check")]
    Authentication,
    #[serde(rename = "encryption_check")]
    Encryption,
    #[serde(rename = "access_control_check")]
    AccessControl,
    #[serde(rename = "general_check")]
    General,
}

impl CheckName {
    /// Wire name (the serde rename).
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckName::Syntax => "syntax_check",
            CheckName::Protocol => "protocol_check",
            CheckName::DataFormat => "data_format_check",
            CheckName::SecurityConfig => "security_check",
            CheckName::Control => "control_check",
            CheckName::Safety => "safety_check",
            CheckName::DeviceManagement => "device_management_check",
            CheckName::Qos => "qos_check",
            CheckName::Authentication => "authentication_check",
            CheckName::Encryption => "encryption_check",
            CheckName::AccessControl => "access_control_check",
            CheckName::General => "general_check",
        }
    }
}

impl fmt::Display for CheckName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a diagnostic disqualifies the artifact or merely advises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Required structure is missing; the verdict fails.
    Critical,
    /// Optional structure is missing; defaults apply, verdict unaffected.
    Advisory,
}

/// One human-readable finding with its severity fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Critical,
        }
    }

    pub fn advisory(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Advisory,
        }
    }
}

/// The outcome of one rule set: named booleans plus ordered diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Declared checks for the category. BTreeMap keeps serialization order
    /// stable so repeated verifications of the same artifact are identical.
    pub checks: BTreeMap<CheckName, bool>,
    /// Findings in the order the rules recorded them.
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    /// Start a result with every declared check passing.
    pub fn with_checks(declared: &[CheckName]) -> Self {
        Self {
            checks: declared.iter().map(|name| (*name, true)).collect(),
            diagnostics: Vec::new(),
        }
    }

    /// Record a disqualifying finding: clears the named check and appends a
    /// critical diagnostic in one step so the two can never diverge.
    pub fn fail(&mut self, check: CheckName, message: impl Into<String>) {
        self.checks.insert(check, false);
        self.diagnostics.push(Diagnostic::critical(message));
    }

    /// Record an advisory finding. No check is touched.
    pub fn advise(&mut self, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::advisory(message));
    }

    /// Mark a check as passing (used where presence of a field is an
    /// independent positive signal).
    pub fn pass(&mut self, check: CheckName) {
        self.checks.insert(check, true);
    }

    /// A check's value; absent checks are vacuously true.
    pub fn check(&self, name: CheckName) -> bool {
        self.checks.get(&name).copied().unwrap_or(true)
    }

    /// True when every present check is true.
    pub fn all_checks_pass(&self) -> bool {
        self.checks.values().all(|passed| *passed)
    }

    /// Messages of critical diagnostics, in recording order.
    pub fn critical_messages(&self) -> Vec<String> {
        self.messages_with(Severity::Critical)
    }

    /// Messages of advisory diagnostics, in recording order.
    pub fn advisory_messages(&self) -> Vec<String> {
        self.messages_with(Severity::Advisory)
    }

    fn messages_with(&self, severity: Severity) -> Vec<String> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_checks_start_true() {
        let result = CheckResult::with_checks(&[CheckName::Syntax, CheckName::Protocol]);
        assert!(result.check(CheckName::Syntax));
        assert!(result.check(CheckName::Protocol));
        assert!(result.all_checks_pass());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_absent_check_is_vacuously_true() {
        let result = CheckResult::with_checks(&[CheckName::Syntax]);
        assert!(result.check(CheckName::Encryption));
    }

    #[test]
    fn test_fail_clears_check_and_records_critical() {
        let mut result = CheckResult::with_checks(&[CheckName::Syntax]);
        result.fail(CheckName::Syntax, "Missing required parameter: device_id");

        assert!(!result.check(CheckName::Syntax));
        assert!(!result.all_checks_pass());
        assert_eq!(
            result.critical_messages(),
            vec!["Missing required parameter: device_id".to_string()]
        );
        assert!(result.advisory_messages().is_empty());
    }

    #[test]
    fn test_advise_leaves_checks_untouched() {
        let mut result = CheckResult::with_checks(&[CheckName::Syntax]);
        result.advise("Missing optional MQTT parameters: qos (using defaults)");

        assert!(result.all_checks_pass());
        assert_eq!(result.advisory_messages().len(), 1);
        assert!(result.critical_messages().is_empty());
    }

    #[test]
    fn test_partition_preserves_recording_order() {
        let mut result = CheckResult::with_checks(&[CheckName::Syntax]);
        result.fail(CheckName::Syntax, "first");
        result.advise("second");
        result.fail(CheckName::Syntax, "third");

        assert_eq!(result.critical_messages(), vec!["first", "third"]);
        assert_eq!(result.advisory_messages(), vec!["second"]);
    }

    #[test]
    fn test_check_names_serialize_to_wire_names() {
        let result = CheckResult::with_checks(&[CheckName::Syntax, CheckName::General]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""syntax_check":true"#));
        assert!(json.contains(r#""general_check":true"#));
    }
}
