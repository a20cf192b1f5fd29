//! Registry loader tests.
//!
//! The loader must fail open: whatever is wrong with the sources, the daemon
//! gets a registry it can serve.

use std::fs;
use tempfile::TempDir;
use veriotd::config::RegistryConfig;
use veriotd::registry::DeviceRegistry;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn config_for(dir: &TempDir) -> RegistryConfig {
    RegistryConfig {
        topology_file: dir.path().join("topology.json").display().to_string(),
        devices_dir: dir.path().join("devices").display().to_string(),
    }
}

#[test]
fn test_loads_topology_and_devices() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "topology.json",
        r#"{"edges": [{"from": "gw1", "to": "s1"}, {"from": "gw1", "to": "a1"}]}"#,
    );

    let devices_dir = dir.path().join("devices");
    fs::create_dir(&devices_dir).unwrap();
    fs::write(
        devices_dir.join("sensor-001.json"),
        r#"{"type": "sensor", "sensor_type": "temperature"}"#,
    )
    .unwrap();
    fs::write(
        devices_dir.join("gateway-001.json"),
        r#"{"type": "gateway", "max_connected_devices": 16}"#,
    )
    .unwrap();

    let registry = DeviceRegistry::load(&config_for(&dir));

    assert_eq!(registry.device_count(), 2);
    assert_eq!(registry.topology_edge_count(), 2);
    assert_eq!(
        registry.device_ids(),
        vec!["gateway-001".to_string(), "sensor-001".to_string()]
    );
    assert!(registry.device("sensor-001").is_some());
    assert!(registry.device("nope").is_none());
}

#[test]
fn test_malformed_device_file_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(&dir, "topology.json", r#"{"edges": []}"#);

    let devices_dir = dir.path().join("devices");
    fs::create_dir(&devices_dir).unwrap();
    fs::write(devices_dir.join("good.json"), r#"{"type": "sensor"}"#).unwrap();
    fs::write(devices_dir.join("bad.json"), "{not json").unwrap();
    fs::write(devices_dir.join("ignored.txt"), "not a device").unwrap();

    let registry = DeviceRegistry::load(&config_for(&dir));

    assert_eq!(registry.device_count(), 1);
    assert!(registry.device("good").is_some());
    assert!(registry.device("bad").is_none());
}

#[test]
fn test_missing_sources_yield_empty_registry() {
    let dir = TempDir::new().unwrap();
    // No topology file, no devices directory
    let registry = DeviceRegistry::load(&config_for(&dir));

    assert_eq!(registry.device_count(), 0);
    assert_eq!(registry.topology_edge_count(), 0);
}

#[test]
fn test_malformed_topology_degrades_to_empty() {
    let dir = TempDir::new().unwrap();
    write(&dir, "topology.json", "][ nonsense");

    let devices_dir = dir.path().join("devices");
    fs::create_dir(&devices_dir).unwrap();
    fs::write(devices_dir.join("s1.json"), r#"{"type": "sensor"}"#).unwrap();

    let registry = DeviceRegistry::load(&config_for(&dir));

    // Devices still load even when the topology is broken
    assert_eq!(registry.topology_edge_count(), 0);
    assert_eq!(registry.device_count(), 1);
}
