//! Verification engine behavior tests.
//!
//! Exercises the full verify path per category: complete configurations pass
//! cleanly, each missing required parameter is reported by name, advisory
//! findings never flip the verdict, and unknown categories verify trivially.

use serde_json::{json, Value};
use veriot_common::{CheckName, Verdict, VerifyRequest};
use veriotd::verifier;

fn verify(verification_type: &str, commands: Value) -> veriot_common::VerifyResponse {
    verifier::verify(&VerifyRequest {
        verification_type: verification_type.to_string(),
        commands,
    })
}

/// Clone an object payload with one key removed.
fn without(value: &Value, key: &str) -> Value {
    let mut map = value.as_object().cloned().unwrap();
    map.remove(key);
    Value::Object(map)
}

fn complete_sensor() -> Value {
    json!({
        "device_id": "sensor-001",
        "sensor_type": "temperature",
        "sampling_rate": 60,
        "data_format": "json",
        "protocol": "mqtt",
        "broker": "10.0.0.5",
        "topic": "sensors/temperature",
        "port": 1883,
        "qos": 1,
        "username": "iot",
        "password": "secret"
    })
}

fn complete_actuator() -> Value {
    json!({
        "device_id": "actuator-001",
        "actuator_type": "valve",
        "control_interface": "modbus",
        "safety_features": ["emergency_stop", "position_limits"]
    })
}

fn complete_gateway() -> Value {
    json!({
        "device_id": "gateway-001",
        "max_connected_devices": 32,
        "protocol_translation": ["mqtt", "coap"],
        "device_discovery": true,
        "device_management": "enabled"
    })
}

fn complete_protocol() -> Value {
    json!({
        "protocol": "mqtt",
        "broker": "10.0.0.5",
        "topic": "plant/telemetry",
        "port": 1883,
        "qos": 2,
        "username": "iot",
        "password": "secret"
    })
}

fn complete_security() -> Value {
    json!({
        "authentication": {"username": "admin", "password": "x"},
        "encryption": "tls1.3"
    })
}

// ============================================================================
// Complete configurations pass
// ============================================================================

#[test]
fn test_complete_configuration_per_category_passes() {
    let cases = [
        ("SD", complete_sensor()),
        ("AD", complete_actuator()),
        ("GW", complete_gateway()),
        ("CP", complete_protocol()),
        ("SC", complete_security()),
    ];

    for (tag, commands) in cases {
        let response = verify(tag, commands);
        assert_eq!(response.result, Verdict::Successful, "category {}", tag);
        assert!(response.errors.is_empty(), "category {}: {:?}", tag, response.errors);
    }
}

// ============================================================================
// Each missing required parameter is reported by name
// ============================================================================

#[test]
fn test_sensor_each_missing_required_parameter_fails() {
    for param in ["device_id", "sensor_type", "sampling_rate", "data_format"] {
        let response = verify("SD", without(&complete_sensor(), param));
        assert_eq!(response.result, Verdict::Failed, "param {}", param);
        let expected = format!("Missing required parameter: {}", param);
        assert!(
            response.errors.contains(&expected),
            "param {}: {:?}",
            param,
            response.errors
        );
    }
}

#[test]
fn test_sensor_each_missing_mqtt_required_fails() {
    for param in ["broker", "topic"] {
        let response = verify("SD", without(&complete_sensor(), param));
        assert_eq!(response.result, Verdict::Failed, "param {}", param);
        let expected = format!("Missing required MQTT parameter: {}", param);
        assert!(
            response.errors.contains(&expected),
            "param {}: {:?}",
            param,
            response.errors
        );
    }
}

#[test]
fn test_actuator_each_missing_required_parameter_fails() {
    for param in [
        "device_id",
        "actuator_type",
        "control_interface",
        "safety_features",
    ] {
        let response = verify("AD", without(&complete_actuator(), param));
        assert_eq!(response.result, Verdict::Failed, "param {}", param);
        let expected = format!("Missing required parameter: {}", param);
        assert!(
            response.errors.contains(&expected),
            "param {}: {:?}",
            param,
            response.errors
        );
    }
}

#[test]
fn test_gateway_each_missing_required_parameter_fails() {
    for param in [
        "device_id",
        "max_connected_devices",
        "protocol_translation",
        "device_discovery",
    ] {
        let response = verify("GW", without(&complete_gateway(), param));
        assert_eq!(response.result, Verdict::Failed, "param {}", param);
        let expected = format!("Missing required parameter: {}", param);
        assert!(
            response.errors.contains(&expected),
            "param {}: {:?}",
            param,
            response.errors
        );
    }
}

#[test]
fn test_gateway_missing_device_management_fails() {
    let response = verify("GW", without(&complete_gateway(), "device_management"));
    assert_eq!(response.result, Verdict::Failed);
    assert!(response
        .errors
        .contains(&"Missing device management configuration".to_string()));
}

#[test]
fn test_protocol_missing_broker_fails_with_combined_message() {
    let response = verify("CP", without(&complete_protocol(), "broker"));
    assert_eq!(response.result, Verdict::Failed);
    assert!(response
        .errors
        .contains(&"Missing required MQTT parameter: broker".to_string()));
}

// ============================================================================
// Advisories never flip the verdict
// ============================================================================

#[test]
fn test_mqtt_missing_optional_fields_stays_successful() {
    let mut commands = complete_protocol();
    for optional in ["port", "qos", "username", "password"] {
        commands = without(&commands, optional);
    }

    let response = verify("CP", commands);
    assert_eq!(response.result, Verdict::Successful);
    assert!(response.errors.is_empty());
    assert_eq!(
        response.warnings,
        vec!["Missing optional MQTT parameters: port, qos, username, password (using defaults)"]
    );
}

#[test]
fn test_warning_text_never_appears_in_errors() {
    let commands = without(&without(&complete_sensor(), "qos"), "username");
    let response = verify("SD", commands);
    assert_eq!(response.result, Verdict::Successful);
    assert!(response.errors.is_empty());
    assert_eq!(response.warnings.len(), 1);
    assert!(response.warnings[0].contains("(using defaults)"));
}

// ============================================================================
// Field aliases
// ============================================================================

#[test]
fn test_topic_filter_alias_satisfies_topic() {
    let mut commands = without(&complete_protocol(), "topic");
    commands
        .as_object_mut()
        .unwrap()
        .insert("topicFilter".to_string(), json!("plant/+/state"));

    let response = verify("CP", commands);
    assert_eq!(response.result, Verdict::Successful);
    assert!(response.errors.is_empty());
}

#[test]
fn test_subscriptions_array_satisfies_topic() {
    let mut commands = without(&complete_protocol(), "topic");
    commands.as_object_mut().unwrap().insert(
        "subscriptions".to_string(),
        json!([{"topic": "plant/1", "qos": 0}]),
    );

    let response = verify("CP", commands);
    assert_eq!(response.result, Verdict::Successful);
}

// ============================================================================
// Unknown categories
// ============================================================================

#[test]
fn test_unknown_verification_type_trivially_passes() {
    for tag in ["", "XYZ", "DEFAULT"] {
        let response = verify(tag, json!({"garbage": true}));
        assert_eq!(response.result, Verdict::Successful, "tag {:?}", tag);
        assert!(response.errors.is_empty());
        assert!(response.warnings.is_empty());
        assert_eq!(response.details.checks.len(), 1);
        assert!(response.details.check(CheckName::General));
    }
}

// ============================================================================
// Security keyword checks
// ============================================================================

#[test]
fn test_security_certificate_and_aes_pass() {
    let response = verify(
        "SC",
        json!({"auth_method": "certificate", "cipher": "aes-256-gcm"}),
    );
    assert_eq!(response.result, Verdict::Successful);
    assert!(response.details.check(CheckName::Authentication));
    assert!(response.details.check(CheckName::Encryption));
}

#[test]
fn test_security_missing_both_reports_both() {
    let response = verify("SC", json!({"note": "wide open"}));
    assert_eq!(response.result, Verdict::Failed);
    assert_eq!(
        response.errors,
        vec!["No authentication method found", "No encryption method found"]
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_repeated_verification_is_identical() {
    let commands = json!({
        "device_id": "sensor-002",
        "sensor_type": "humidity",
        "protocol": "mqtt",
        "broker": "10.0.0.5"
    });

    let first = verify("SD", commands.clone());
    let second = verify("SD", commands);

    assert_eq!(first.result, second.result);
    assert_eq!(first.errors, second.errors);
    assert_eq!(first.warnings, second.warnings);
    assert_eq!(first.details, second.details);
}
