//! Configuration management for veriotd.
//!
//! Loads settings from /etc/veriot/config.toml or uses defaults.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/veriot/config.toml";

/// Default config file path for fallback
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/veriot/config.toml";

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    // Localhost only; the verifier has no auth layer
    "127.0.0.1:7410".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Device registry source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Topology JSON file
    #[serde(default = "default_topology_file")]
    pub topology_file: String,

    /// Directory of per-device JSON records
    #[serde(default = "default_devices_dir")]
    pub devices_dir: String,
}

fn default_topology_file() -> String {
    "/var/lib/veriot/topology.json".to_string()
}

fn default_devices_dir() -> String {
    "/var/lib/veriot/devices".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            topology_file: default_topology_file(),
            devices_dir: default_devices_dir(),
        }
    }
}

/// Daemon identity configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonConfig {
    /// Service name reported by /v1/health
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

fn default_service_name() -> String {
    "IoT Configuration Verifier".to_string()
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
        }
    }
}

/// Full daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub daemon: DaemonConfig,
}

impl Config {
    /// Load config from file, or return defaults
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_PATH)
            .or_else(|_| Self::load_from_path(DEFAULT_CONFIG_PATH))
            .unwrap_or_else(|e| {
                warn!("Config not found, using defaults: {}", e);
                Config::default()
            })
    }

    /// Load config from specific path
    pub fn load_from_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from {}", path);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7410");
        assert_eq!(config.registry.topology_file, "/var/lib/veriot/topology.json");
        assert_eq!(config.registry.devices_dir, "/var/lib/veriot/devices");
        assert_eq!(config.daemon.service_name, "IoT Configuration Verifier");
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
[server]
bind_addr = "0.0.0.0:9000"

[registry]
topology_file = "data/topology.json"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.bind_addr, "0.0.0.0:9000");
        assert_eq!(config.registry.topology_file, "data/topology.json");
        // Defaults for missing fields
        assert_eq!(config.registry.devices_dir, "/var/lib/veriot/devices");
        assert_eq!(config.daemon.service_name, "IoT Configuration Verifier");
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:7410");
    }
}
