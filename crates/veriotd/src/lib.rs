//! Veriot Daemon - IoT configuration verification service
//!
//! Loads the device registry at startup, then serves the rule-based
//! verification engine and read-only registry views over HTTP.

pub mod config;
pub mod metrics;
pub mod registry;
pub mod routes;
pub mod server;
pub mod verifier;
