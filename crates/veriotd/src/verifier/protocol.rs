//! Communication protocol (CP) rule set.
//!
//! The only category that inspects JSON structure. Protocol recognition runs
//! over the lowercased text; MQTT field resolution walks tiers from direct
//! keys through `subscriptions` elements and topic aliases down to a
//! lowercased substring fallback. Generated configs name fields
//! inconsistently, so every tier earns its keep.

use veriot_common::{CheckName, CheckResult, ConfigArtifact};

const SUPPORTED_PROTOCOLS: [&str; 8] = [
    "mqtt",
    "coap",
    "http",
    "websocket",
    "lora",
    "zigbee",
    "tcp",
    "udp",
];

const TOPIC_ALIASES: [&str; 3] = ["topicFilter", "topic_name", "mqtt_topic"];
const OPTIONAL_MQTT_PARAMS: [&str; 4] = ["port", "qos", "username", "password"];

pub fn evaluate(artifact: &ConfigArtifact) -> CheckResult {
    let mut result = CheckResult::with_checks(&[
        CheckName::Syntax,
        CheckName::Protocol,
        CheckName::SecurityConfig,
        CheckName::Qos,
    ]);

    let protocol_found = SUPPORTED_PROTOCOLS
        .iter()
        .any(|p| artifact.contains_lower(p));
    if !protocol_found {
        result.fail(
            CheckName::Protocol,
            "No supported communication protocol found",
        );
    }

    if artifact.contains_lower("mqtt") {
        let mut missing_required = Vec::new();
        if !artifact.resolve_field("broker", &[]) {
            missing_required.push("broker");
        }
        if !artifact.resolve_field("topic", &TOPIC_ALIASES) {
            missing_required.push("topic");
        }

        if !missing_required.is_empty() {
            result.fail(
                CheckName::Protocol,
                format!(
                    "Missing required MQTT parameter: {}",
                    missing_required.join(", ")
                ),
            );
        }

        let missing_optional: Vec<&str> = OPTIONAL_MQTT_PARAMS
            .iter()
            .filter(|param| !artifact.resolve_direct(param))
            .copied()
            .collect();

        if !missing_optional.is_empty() {
            result.advise(format!(
                "Missing optional MQTT parameters: {} (using defaults)",
                missing_optional.join(", ")
            ));
        }
    } else if artifact.contains_lower("tcp") || artifact.contains_lower("udp") {
        // Naming the transport is enough for these
        result.pass(CheckName::Protocol);
    }

    result
}
