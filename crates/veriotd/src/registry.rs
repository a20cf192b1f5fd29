//! Device and topology registry.
//!
//! One-shot load at startup from a topology JSON file plus a directory of
//! per-device JSON records. Fail-open: a missing or malformed source degrades
//! to an empty view and the daemon keeps serving. Immutable after load.

use crate::config::RegistryConfig;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// In-memory snapshot of the IoT registry.
#[derive(Debug, Clone)]
pub struct DeviceRegistry {
    /// Free-form topology document. Falls back to `{"edges": []}`.
    pub topology: Value,
    /// Device records keyed by file stem.
    pub devices: BTreeMap<String, Value>,
}

impl DeviceRegistry {
    /// Empty registry (no topology edges, no devices).
    pub fn empty() -> Self {
        Self {
            topology: empty_topology(),
            devices: BTreeMap::new(),
        }
    }

    /// Load both sources. Never fails; problems are logged and skipped.
    pub fn load(config: &RegistryConfig) -> Self {
        let topology = load_topology(Path::new(&config.topology_file));
        let devices = load_devices(Path::new(&config.devices_dir));
        info!(
            "Registry loaded: {} devices, {} topology edges",
            devices.len(),
            edge_count(&topology)
        );
        Self { topology, devices }
    }

    pub fn device(&self, device_id: &str) -> Option<&Value> {
        self.devices.get(device_id)
    }

    /// Sorted device ids.
    pub fn device_ids(&self) -> Vec<String> {
        self.devices.keys().cloned().collect()
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn topology_edge_count(&self) -> usize {
        edge_count(&self.topology)
    }
}

fn empty_topology() -> Value {
    serde_json::json!({ "edges": [] })
}

fn edge_count(topology: &Value) -> usize {
    topology
        .get("edges")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

fn load_topology(path: &Path) -> Value {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Cannot read topology {}: {}", path.display(), e);
            return empty_topology();
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => {
            info!("Topology loaded from {}", path.display());
            v
        }
        Err(e) => {
            warn!("Malformed topology {}: {}", path.display(), e);
            empty_topology()
        }
    }
}

fn load_devices(dir: &Path) -> BTreeMap<String, Value> {
    let mut devices = BTreeMap::new();

    if !dir.is_dir() {
        warn!("Devices directory {} not found", dir.display());
        return devices;
    }

    for entry in WalkDir::new(dir)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Error walking devices directory: {}", e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }

        let Some(device_id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|content| {
            serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
        }) {
            Ok(record) => {
                devices.insert(device_id.to_string(), record);
            }
            Err(e) => {
                warn!("Skipping device file {}: {}", path.display(), e);
            }
        }
    }

    devices
}
