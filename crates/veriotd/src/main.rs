//! Veriot Daemon - IoT configuration verification service
//!
//! Loads the device registry, then serves the rule engine over HTTP.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;
use veriotd::config::Config;
use veriotd::registry::DeviceRegistry;
use veriotd::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    info!("Veriot daemon v{} starting", env!("CARGO_PKG_VERSION"));

    let config = Config::load();
    let registry = DeviceRegistry::load(&config.registry);

    server::run(AppState::new(config, registry)).await
}
