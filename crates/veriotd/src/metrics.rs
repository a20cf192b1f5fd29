//! Prometheus metrics for the verification service

use prometheus::{
    register_counter_vec_with_registry, register_histogram_with_registry,
    register_int_gauge_with_registry, CounterVec, Encoder, Histogram, IntGauge, Registry,
    TextEncoder,
};
use std::sync::Arc;

/// Verifier metrics for Prometheus
#[derive(Clone)]
pub struct VerifierMetrics {
    pub verifications_total: CounterVec,
    pub verify_duration_seconds: Histogram,
    pub devices_loaded: IntGauge,
    pub topology_edges: IntGauge,

    registry: Arc<Registry>,
}

impl VerifierMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let verifications_total = register_counter_vec_with_registry!(
            "veriot_verifications_total",
            "Total number of verification requests by category and result",
            &["category", "result"],
            registry
        )
        .unwrap();

        let verify_duration_seconds = register_histogram_with_registry!(
            "veriot_verify_duration_seconds",
            "Verification request duration in seconds",
            vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5],
            registry
        )
        .unwrap();

        let devices_loaded = register_int_gauge_with_registry!(
            "veriot_devices_loaded",
            "Number of device records loaded into the registry",
            registry
        )
        .unwrap();

        let topology_edges = register_int_gauge_with_registry!(
            "veriot_topology_edges",
            "Number of edges in the loaded topology",
            registry
        )
        .unwrap();

        Self {
            verifications_total,
            verify_duration_seconds,
            devices_loaded,
            topology_edges,
            registry: Arc::new(registry),
        }
    }

    /// Record one verification with its outcome and latency
    pub fn record_verification(&self, category: &str, result: &str, duration_secs: f64) {
        self.verifications_total
            .with_label_values(&[category, result])
            .inc();
        self.verify_duration_seconds.observe(duration_secs);
    }

    /// Update registry size gauges after load
    pub fn set_registry_size(&self, devices: usize, edges: usize) {
        self.devices_loaded.set(devices as i64);
        self.topology_edges.set(edges as i64);
    }

    /// Export metrics in Prometheus text format
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }
}

impl Default for VerifierMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_contains_registered_metrics() {
        let metrics = VerifierMetrics::new();
        metrics.record_verification("SD", "Successful", 0.002);
        metrics.set_registry_size(4, 7);

        let text = metrics.export();
        assert!(text.contains("veriot_verifications_total"));
        assert!(text.contains("veriot_devices_loaded 4"));
        assert!(text.contains("veriot_topology_edges 7"));
    }

    #[test]
    fn test_counter_labels() {
        let metrics = VerifierMetrics::new();
        metrics.record_verification("CP", "Verification failed", 0.001);
        metrics.record_verification("CP", "Verification failed", 0.001);

        let text = metrics.export();
        assert!(text.contains(r#"category="CP""#));
        assert!(text.contains(r#"result="Verification failed""#));
    }
}
