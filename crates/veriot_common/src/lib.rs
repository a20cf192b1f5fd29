//! Veriot Common - Shared types for the veriot daemon and CLI.
//!
//! Wire formats, the configuration artifact abstraction used by the rule
//! engine, and the Ollama chat client shared by the orchestration pipeline.

pub mod api;
pub mod artifact;
pub mod category;
pub mod checks;
pub mod ollama;

pub use api::*;
pub use artifact::ConfigArtifact;
pub use category::Category;
pub use checks::{CheckName, CheckResult, Diagnostic, Severity};
