//! Rule-based verification engine.
//!
//! `dispatch` routes a category tag to its rule set; `verify` wraps the full
//! request path: build the artifact once, run the rules, aggregate into the
//! wire response. Pure functions of their inputs; every artifact yields a
//! verdict, never an error.

pub mod actuator;
pub mod gateway;
pub mod protocol;
pub mod security;
pub mod sensor;

use chrono::Utc;
use veriot_common::{
    Category, CheckName, CheckResult, ConfigArtifact, Verdict, VerifyRequest, VerifyResponse,
};

/// Route a verification-type tag to its rule set. Unknown tags (including
/// empty) verify trivially: one true general_check, no diagnostics.
pub fn dispatch(tag: &str, artifact: &ConfigArtifact) -> CheckResult {
    match Category::from_tag(tag) {
        Some(Category::Sensor) => sensor::evaluate(artifact),
        Some(Category::Actuator) => actuator::evaluate(artifact),
        Some(Category::Gateway) => gateway::evaluate(artifact),
        Some(Category::Protocol) => protocol::evaluate(artifact),
        Some(Category::Security) => security::evaluate(artifact),
        None => CheckResult::with_checks(&[CheckName::General]),
    }
}

/// Full verification path for one request.
pub fn verify(request: &VerifyRequest) -> VerifyResponse {
    let artifact = ConfigArtifact::from_value(&request.commands);
    let result = dispatch(&request.verification_type, &artifact);
    aggregate(&request.verification_type, result)
}

/// Fold a CheckResult into the wire response. Successful iff every present
/// check is true and no critical diagnostic was recorded; either signal alone
/// fails the verdict.
fn aggregate(verification_type: &str, result: CheckResult) -> VerifyResponse {
    let errors = result.critical_messages();
    let warnings = result.advisory_messages();

    let verdict = if result.all_checks_pass() && errors.is_empty() {
        Verdict::Successful
    } else {
        Verdict::Failed
    };

    VerifyResponse {
        result: verdict,
        verification_type: verification_type.to_string(),
        timestamp: Utc::now().to_rfc3339(),
        errors,
        warnings,
        details: result,
    }
}
