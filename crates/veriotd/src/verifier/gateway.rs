//! Gateway device (GW) rule set.
//!
//! Declares the widest check set of any category. Most entries are always-pass
//! placeholders kept for response-shape stability; only syntax_check and
//! device_management_check carry rules.

use veriot_common::{CheckName, CheckResult, ConfigArtifact};

const REQUIRED_PARAMS: [&str; 4] = [
    "device_id",
    "max_connected_devices",
    "protocol_translation",
    "device_discovery",
];

pub fn evaluate(artifact: &ConfigArtifact) -> CheckResult {
    let mut result = CheckResult::with_checks(&[
        CheckName::Syntax,
        CheckName::Protocol,
        CheckName::DeviceManagement,
        CheckName::SecurityConfig,
        CheckName::DataFormat,
        CheckName::Control,
        CheckName::Safety,
        CheckName::Authentication,
        CheckName::Encryption,
        CheckName::General,
    ]);

    for param in REQUIRED_PARAMS {
        if !artifact.contains(param) {
            result.fail(
                CheckName::Syntax,
                format!("Missing required parameter: {}", param),
            );
        }
    }

    if artifact.contains("device_management") {
        result.pass(CheckName::DeviceManagement);
    } else {
        result.fail(
            CheckName::DeviceManagement,
            "Missing device management configuration",
        );
    }

    result
}
