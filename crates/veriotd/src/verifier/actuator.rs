//! Actuator device (AD) rule set.
//!
//! The control_interface parameter feeds two checks: its absence clears
//! syntax_check as a missing required parameter and control_check with its
//! own diagnostic. Kept as two independent signals.

use veriot_common::{CheckName, CheckResult, ConfigArtifact};

const REQUIRED_PARAMS: [&str; 4] = [
    "device_id",
    "actuator_type",
    "control_interface",
    "safety_features",
];

pub fn evaluate(artifact: &ConfigArtifact) -> CheckResult {
    let mut result = CheckResult::with_checks(&[
        CheckName::Syntax,
        CheckName::Protocol,
        CheckName::Control,
        CheckName::Safety,
    ]);

    for param in REQUIRED_PARAMS {
        if !artifact.contains(param) {
            result.fail(
                CheckName::Syntax,
                format!("Missing required parameter: {}", param),
            );
        }
    }

    if artifact.contains("control_interface") {
        result.pass(CheckName::Control);
    } else {
        result.fail(
            CheckName::Control,
            "Missing control interface configuration",
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(text: &str) -> ConfigArtifact {
        ConfigArtifact::from_text(text)
    }

    #[test]
    fn test_complete_actuator_passes() {
        let result = evaluate(&artifact(
            r#"{"device_id": "a1", "actuator_type": "valve", "control_interface": "modbus", "safety_features": ["estop"]}"#,
        ));
        assert!(result.all_checks_pass());
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_safety_features_fails_syntax() {
        let result = evaluate(&artifact(
            r#"{"device_id": "a1", "actuator_type": "valve", "control_interface": "modbus"}"#,
        ));
        assert!(!result.check(CheckName::Syntax));
        assert!(result.check(CheckName::Control));
        assert_eq!(
            result.critical_messages(),
            vec!["Missing required parameter: safety_features"]
        );
    }

    #[test]
    fn test_missing_control_interface_fails_both_checks() {
        let result = evaluate(&artifact(
            r#"{"device_id": "a1", "actuator_type": "valve", "safety_features": ["estop"]}"#,
        ));
        assert!(!result.check(CheckName::Syntax));
        assert!(!result.check(CheckName::Control));
        assert_eq!(
            result.critical_messages(),
            vec![
                "Missing required parameter: control_interface",
                "Missing control interface configuration"
            ]
        );
    }
}
