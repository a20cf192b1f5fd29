//! Wire types for the veriotd HTTP API
//!
//! Request and response bodies shared between the daemon handlers and the
//! veriotctl client. Field names and verdict strings follow the established
//! wire contract, so renames here are breaking changes.

use crate::checks::CheckResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

fn default_verification_type() -> String {
    "DEFAULT".to_string()
}

fn default_commands() -> Value {
    Value::Array(Vec::new())
}

/// Body of `POST /v1/verify`.
///
/// Both fields are optional on the wire: an absent `verification_type` routes
/// to the trivially-passing default rules, an absent `commands` verifies an
/// empty artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRequest {
    #[serde(default = "default_verification_type")]
    pub verification_type: String,
    /// Arbitrary JSON payload: object, array, string, or anything else.
    #[serde(default = "default_commands")]
    pub commands: Value,
}

/// Overall verdict, serialized with the exact wire strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Successful")]
    Successful,
    #[serde(rename = "Verification failed")]
    Failed,
}

impl Verdict {
    pub fn is_success(&self) -> bool {
        matches!(self, Verdict::Successful)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Successful => "Successful",
            Verdict::Failed => "Verification failed",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Body of the `POST /v1/verify` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub result: Verdict,
    /// Echo of the requested verification type.
    pub verification_type: String,
    /// ISO-8601 (RFC 3339) timestamp of the verification.
    pub timestamp: String,
    /// Critical diagnostic messages, in the order the rules recorded them.
    /// Empty on success.
    pub errors: Vec<String>,
    /// Advisory messages. Never affect the verdict.
    pub warnings: Vec<String>,
    /// Full per-check outcome for the category.
    pub details: CheckResult,
}

/// Body of `GET /v1/topology`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyResponse {
    pub topology: Value,
    /// Registered device ids, sorted.
    pub devices: Vec<String>,
    pub device_count: usize,
    pub timestamp: String,
}

/// Body of `GET /v1/devices`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: BTreeMap<String, Value>,
    pub device_count: usize,
    pub timestamp: String,
}

/// Body of `GET /v1/devices/{device_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceResponse {
    pub device: Value,
    pub timestamp: String,
}

/// Body of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub devices_loaded: usize,
    pub topology_edges: usize,
    pub timestamp: String,
}

/// Error body for non-2xx responses (unknown device, bad request).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_request_defaults() {
        let req: VerifyRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.verification_type, "DEFAULT");
        assert_eq!(req.commands, Value::Array(Vec::new()));
    }

    #[test]
    fn test_verify_request_explicit_fields() {
        let req: VerifyRequest = serde_json::from_str(
            r#"{"verification_type": "SD", "commands": {"device_id": "s1"}}"#,
        )
        .unwrap();
        assert_eq!(req.verification_type, "SD");
        assert!(req.commands.is_object());
    }

    #[test]
    fn test_verdict_wire_strings() {
        assert_eq!(
            serde_json::to_string(&Verdict::Successful).unwrap(),
            r#""Successful""#
        );
        assert_eq!(
            serde_json::to_string(&Verdict::Failed).unwrap(),
            r#""Verification failed""#
        );
    }

    #[test]
    fn test_verdict_round_trip() {
        let v: Verdict = serde_json::from_str(r#""Verification failed""#).unwrap();
        assert_eq!(v, Verdict::Failed);
        assert!(!v.is_success());
    }
}
