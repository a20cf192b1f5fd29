//! Security configuration (SC) rule set.
//!
//! Keyword scans over the lowercased text: at least one authentication method
//! and one encryption method must be named. access_control_check is a
//! placeholder.

use veriot_common::{CheckName, CheckResult, ConfigArtifact};

const AUTH_METHODS: [&str; 5] = ["username", "password", "certificate", "jwt", "oauth"];
const ENCRYPTION_METHODS: [&str; 4] = ["tls", "ssl", "aes", "encryption"];

pub fn evaluate(artifact: &ConfigArtifact) -> CheckResult {
    let mut result = CheckResult::with_checks(&[
        CheckName::Syntax,
        CheckName::Authentication,
        CheckName::Encryption,
        CheckName::AccessControl,
    ]);

    let auth_found = AUTH_METHODS.iter().any(|m| artifact.contains_lower(m));
    if !auth_found {
        result.fail(CheckName::Authentication, "No authentication method found");
    }

    let encryption_found = ENCRYPTION_METHODS
        .iter()
        .any(|m| artifact.contains_lower(m));
    if !encryption_found {
        result.fail(CheckName::Encryption, "No encryption method found");
    }

    result
}
