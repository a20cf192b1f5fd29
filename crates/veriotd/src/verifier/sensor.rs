//! Sensor device (SD) rule set.
//!
//! Required parameters are case-sensitive substring checks against the
//! artifact text. MQTT rules apply only when the lowercased text mentions
//! mqtt; optional MQTT parameters combine into a single advisory.

use veriot_common::{CheckName, CheckResult, ConfigArtifact};

const REQUIRED_PARAMS: [&str; 4] = ["device_id", "sensor_type", "sampling_rate", "data_format"];
const REQUIRED_MQTT_PARAMS: [&str; 2] = ["broker", "topic"];
const OPTIONAL_MQTT_PARAMS: [&str; 4] = ["port", "qos", "username", "password"];

pub fn evaluate(artifact: &ConfigArtifact) -> CheckResult {
    let mut result = CheckResult::with_checks(&[
        CheckName::Syntax,
        CheckName::Protocol,
        CheckName::DataFormat,
        CheckName::SecurityConfig,
    ]);

    for param in REQUIRED_PARAMS {
        if !artifact.contains(param) {
            result.fail(
                CheckName::Syntax,
                format!("Missing required parameter: {}", param),
            );
        }
    }

    if artifact.contains_lower("mqtt") {
        for param in REQUIRED_MQTT_PARAMS {
            if !artifact.contains(param) {
                result.fail(
                    CheckName::Protocol,
                    format!("Missing required MQTT parameter: {}", param),
                );
            }
        }

        let missing_optional: Vec<&str> = OPTIONAL_MQTT_PARAMS
            .iter()
            .filter(|param| !artifact.contains(param))
            .copied()
            .collect();

        if !missing_optional.is_empty() {
            result.advise(format!(
                "Missing optional MQTT parameters: {} (using defaults)",
                missing_optional.join(", ")
            ));
        }
    }

    result
}
