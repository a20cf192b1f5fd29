//! Benchmark data collector.
//!
//! Runs a built-in suite of 20 labelled requirements (all five verification
//! categories, passing and failing cases) through the full pipeline for N
//! iterations, records per-stage latencies and accuracy flags, writes the
//! full records as JSON plus a flat CSV report, and prints the statistics
//! summary.

use crate::config::Config;
use crate::client::VerifierClient;
use crate::pipeline::Pipeline;
use crate::prompts::PromptSet;
use crate::report::{self, RecordView};
use anyhow::{bail, Context, Result};
use chrono::{Local, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use veriot_common::Category;

/// One labelled benchmark case.
pub struct TestCase {
    pub requirement: &'static str,
    pub expected_category: Category,
    pub expected_success: bool,
    pub label: &'static str,
    pub description: &'static str,
}

/// The built-in suite: four sensor, four actuator, three gateway, five
/// protocol, and four security cases, mixing complete and deliberately
/// incomplete requirements.
pub fn suite() -> Vec<TestCase> {
    use Category::*;
    vec![
        TestCase {
            requirement: "Configure a temperature sensor with device ID temp_001, sampling rate 1Hz, data format JSON",
            expected_category: Sensor,
            expected_success: true,
            label: "Temperature_Sensor",
            description: "Temperature Sensor Configuration",
        },
        TestCase {
            requirement: "Set up humidity sensor, device ID humidity_01, sampling every 30 seconds, send data via MQTT",
            expected_category: Sensor,
            expected_success: true,
            label: "Humidity_Sensor",
            description: "Humidity Sensor with MQTT",
        },
        TestCase {
            requirement: "Configure motion sensor with device ID motion_001, sampling rate 10Hz, data format binary",
            expected_category: Sensor,
            expected_success: true,
            label: "Motion_Sensor",
            description: "Motion Sensor Configuration",
        },
        TestCase {
            requirement: "Set up pressure sensor but missing device ID",
            expected_category: Sensor,
            expected_success: false,
            label: "Incomplete_Sensor",
            description: "Incomplete Sensor Configuration",
        },
        TestCase {
            requirement: "Configure smart light actuator, device ID light_001, control brightness 0-100%, response time <100ms",
            expected_category: Actuator,
            expected_success: true,
            label: "Smart_Light",
            description: "Smart Light Actuator Configuration",
        },
        TestCase {
            requirement: "Set up motor actuator, device ID motor_01, speed control 0-1000 RPM, safety limits enabled",
            expected_category: Actuator,
            expected_success: true,
            label: "Motor_Actuator",
            description: "Motor Actuator with Safety",
        },
        TestCase {
            requirement: "Configure valve actuator, device ID valve_001, position control 0-100%, emergency stop function",
            expected_category: Actuator,
            expected_success: true,
            label: "Valve_Actuator",
            description: "Valve Actuator Configuration",
        },
        TestCase {
            requirement: "Set up actuator but no safety mechanism specified",
            expected_category: Actuator,
            expected_success: false,
            label: "Unsafe_Actuator",
            description: "Actuator without Safety",
        },
        TestCase {
            requirement: "Configure IoT gateway, device ID gateway_01, support max 100 devices, protocol translation MQTT to HTTP",
            expected_category: Gateway,
            expected_success: true,
            label: "IoT_Gateway",
            description: "IoT Gateway Configuration",
        },
        TestCase {
            requirement: "Set up edge gateway, device ID edge_01, device discovery enabled, firmware update support",
            expected_category: Gateway,
            expected_success: true,
            label: "Edge_Gateway",
            description: "Edge Gateway with Management",
        },
        TestCase {
            requirement: "Configure gateway but missing device management capabilities",
            expected_category: Gateway,
            expected_success: false,
            label: "Incomplete_Gateway",
            description: "Incomplete Gateway Configuration",
        },
        TestCase {
            requirement: "Configure MQTT client to connect to mqtt.example.com, port 1883, topic sensors/temperature, QoS 1",
            expected_category: Protocol,
            expected_success: true,
            label: "MQTT_Standard",
            description: "Standard MQTT Client Configuration",
        },
        TestCase {
            requirement: "Set up MQTT broker at broker.hivemq.com, port 8883, use TLS encryption, topic device/status",
            expected_category: Protocol,
            expected_success: true,
            label: "MQTT_TLS",
            description: "TLS Encrypted MQTT Configuration",
        },
        TestCase {
            requirement: "Configure a TCP server listening on port 8080, allow max 100 concurrent connections",
            expected_category: Protocol,
            expected_success: true,
            label: "TCP_Server",
            description: "TCP Server Configuration",
        },
        TestCase {
            requirement: "Set up UDP client, target address 192.168.1.100, port 5000",
            expected_category: Protocol,
            expected_success: true,
            label: "UDP_Client",
            description: "UDP Client Configuration",
        },
        TestCase {
            requirement: "Configure a non-existent protocol xyz://example.com",
            expected_category: Protocol,
            expected_success: false,
            label: "Invalid_Protocol",
            description: "Invalid Protocol Configuration",
        },
        TestCase {
            requirement: "Configure device authentication using username/password, enable TLS encryption",
            expected_category: Security,
            expected_success: true,
            label: "Auth_Encryption",
            description: "Authentication and Encryption",
        },
        TestCase {
            requirement: "Set up certificate-based authentication, AES-256 encryption, access control list",
            expected_category: Security,
            expected_success: true,
            label: "Certificate_Auth",
            description: "Certificate-based Security",
        },
        TestCase {
            requirement: "Configure JWT token authentication, OAuth 2.0 authorization",
            expected_category: Security,
            expected_success: true,
            label: "JWT_OAuth",
            description: "JWT and OAuth Security",
        },
        TestCase {
            requirement: "Set up security but no authentication method specified",
            expected_category: Security,
            expected_success: false,
            label: "Incomplete_Security",
            description: "Incomplete Security Configuration",
        },
    ]
}

/// Full record of one benchmark test, serialized into the JSON results file.
#[derive(Debug, Clone, Serialize)]
pub struct TestRecord {
    pub test_id: String,
    pub requirement: String,
    pub description: String,
    pub category: String,
    pub expected_type: String,
    pub expected_success: bool,

    pub recognized_type: String,
    pub translation: String,
    pub translate_time: f64,

    pub configuration: String,
    pub config_time: f64,

    pub verification_result: String,
    pub verification_success: bool,
    pub verify_time: f64,
    pub total_time: f64,

    pub type_accuracy: bool,
    pub success_accuracy: bool,

    pub timestamp: String,
    pub errors: Vec<String>,
    /// Pipeline failure, when a stage errored before a verdict was reached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestRecord {
    fn view(&self) -> RecordView {
        RecordView {
            expected_type: self.expected_type.clone(),
            errored: self.error.is_some(),
            type_accuracy: self.type_accuracy,
            success_accuracy: self.success_accuracy,
            total_secs: self.total_time,
        }
    }
}

/// CSV column order for the report file.
pub const CSV_HEADER: &[&str] = &[
    "Test ID",
    "Category",
    "Description",
    "Requirement",
    "Expected Type",
    "Expected Success",
    "Recognized Type",
    "Type Accuracy",
    "Verification Result",
    "Verification Accuracy",
    "Total Time",
    "Translate Time",
    "Config Time",
    "Verify Time",
    "Errors",
    "Timestamp",
];

/// Run the full benchmark and write the result files into `output_dir`.
pub async fn run_bench(config: &Config, iterations: u32, output_dir: &Path) -> Result<()> {
    let prompts = PromptSet::load(Path::new(&config.prompts.dir))?;
    let verifier = VerifierClient::new(&config.verifier.base_url);
    let pipeline = Pipeline::new(
        &config.llm.base_url,
        &config.llm.model,
        config.llm.translate_timeout_ms,
        config.llm.configure_timeout_ms,
        verifier,
        prompts,
    );

    check_environment(&pipeline, config).await?;

    let cases = suite();
    println!("{}", "=".repeat(70));
    println!("Benchmark data collection");
    println!("{}", "=".repeat(70));
    println!("Model: {}", config.llm.model);
    println!("Test cases: {}", cases.len());
    println!("Iterations: {}", iterations);
    println!("Total tests: {}", cases.len() as u32 * iterations);
    println!("{}", "=".repeat(70));

    let mut records = Vec::new();
    for iteration in 1..=iterations {
        println!();
        println!("Iteration {}", iteration);
        println!("{}", "-".repeat(40));

        for (index, case) in cases.iter().enumerate() {
            let test_id = format!("iter_{}_test_{}", iteration, index + 1);
            println!(
                "  {} [{}]",
                case.description,
                case.expected_category.tag()
            );

            let record = run_case(&pipeline, case, &test_id).await;
            print_case_outcome(&record);
            records.push(record);
        }
    }

    println!();
    println!("Benchmark completed, {} tests", records.len());

    let (json_file, csv_file) = save_records(&records, output_dir)?;
    println!();
    println!("Data saved:");
    println!("  Detailed results: {}", json_file.display());
    println!("  CSV report:       {}", csv_file.display());

    let views: Vec<RecordView> = records.iter().map(TestRecord::view).collect();
    if let Some(summary) = report::BenchSummary::compute(&views) {
        report::print_summary(&summary);
    }

    Ok(())
}

/// Abort early with actionable messages when the model or the verifier is
/// missing. A 100-test run against a dead daemon helps nobody.
async fn check_environment(pipeline: &Pipeline, config: &Config) -> Result<()> {
    println!("Checking environment...");

    let ollama = veriot_common::ollama::OllamaClient::with_url(&config.llm.base_url);
    if !ollama.is_available().await {
        bail!(
            "Ollama not reachable at {}. Start it with: ollama serve",
            config.llm.base_url
        );
    }
    let models = ollama
        .list_models()
        .await
        .context("listing Ollama models")?;
    if !ollama.has_model(&config.llm.model).await? {
        bail!(
            "Model {} not found. Available: {}. Pull it with: ollama pull {}",
            config.llm.model,
            models
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            config.llm.model
        );
    }
    println!("  Ollama available, model {} present", config.llm.model);

    let health = pipeline
        .verifier()
        .health()
        .await
        .with_context(|| {
            format!(
                "verifier not reachable at {}. Start it with: veriotd",
                config.verifier.base_url
            )
        })?;
    println!(
        "  Verifier healthy: {} v{} ({} devices, {} edges)",
        health.service, health.version, health.devices_loaded, health.topology_edges
    );

    Ok(())
}

async fn run_case(pipeline: &Pipeline, case: &TestCase, test_id: &str) -> TestRecord {
    let mut record = TestRecord {
        test_id: test_id.to_string(),
        requirement: case.requirement.to_string(),
        description: case.description.to_string(),
        category: case.label.to_string(),
        expected_type: case.expected_category.tag().to_string(),
        expected_success: case.expected_success,
        recognized_type: String::new(),
        translation: String::new(),
        translate_time: 0.0,
        configuration: String::new(),
        config_time: 0.0,
        verification_result: String::new(),
        verification_success: false,
        verify_time: 0.0,
        total_time: 0.0,
        type_accuracy: false,
        success_accuracy: false,
        timestamp: Utc::now().to_rfc3339(),
        errors: Vec::new(),
        error: None,
    };

    // Unclassifiable translations fall back to CP so every bench run reaches
    // the verifier and the accuracy columns stay comparable.
    match pipeline.run(case.requirement, Some(Category::Protocol)).await {
        Ok(run) => {
            record.translation = run.translation;
            record.translate_time = run.timings.translate_secs;
            record.config_time = run.timings.configure_secs;
            record.verify_time = run.timings.verify_secs;
            record.total_time = run.timings.total_secs;

            if let Some(category) = run.category {
                record.recognized_type = category.tag().to_string();
                record.type_accuracy = category == case.expected_category;
            }
            if let Some(configuration) = run.configuration {
                record.configuration = configuration;
            }
            if let Some(verification) = run.verification {
                record.verification_success = verification.result.is_success();
                record.verification_result = verification.result.as_str().to_string();
                record.success_accuracy = record.verification_success == case.expected_success;
                record.errors = verification.errors;
            }
        }
        Err(e) => {
            record.error = Some(format!("{:#}", e));
        }
    }

    record
}

fn print_case_outcome(record: &TestRecord) {
    if let Some(error) = &record.error {
        println!("     {} {}", "ERROR".red(), error);
        return;
    }
    let type_acc = if record.type_accuracy {
        "PASS".green().to_string()
    } else {
        "FAIL".red().to_string()
    };
    let success_acc = if record.success_accuracy {
        "PASS".green().to_string()
    } else {
        "FAIL".red().to_string()
    };
    println!(
        "     {} Type Recognition | {} Verification | Time: {:.1}s",
        type_acc, success_acc, record.total_time
    );
}

/// Write the JSON results file and the CSV report, timestamped.
fn save_records(records: &[TestRecord], output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("creating {}", output_dir.display()))?;

    let stamp = Local::now().format("%Y%m%d_%H%M%S");

    let json_file = output_dir.join(format!("bench_results_{}.json", stamp));
    let json = serde_json::to_string_pretty(records)?;
    fs::write(&json_file, json)
        .with_context(|| format!("writing {}", json_file.display()))?;

    let csv_file = output_dir.join(format!("bench_report_{}.csv", stamp));
    fs::write(&csv_file, records_to_csv(records))
        .with_context(|| format!("writing {}", csv_file.display()))?;

    Ok((json_file, csv_file))
}

/// Render records as RFC-4180 CSV with the fixed header.
pub fn records_to_csv(records: &[TestRecord]) -> String {
    let mut out = String::new();
    out.push_str(&CSV_HEADER.join(","));
    out.push('\n');

    for r in records {
        let fields = [
            r.test_id.clone(),
            r.category.clone(),
            r.description.clone(),
            r.requirement.clone(),
            r.expected_type.clone(),
            r.expected_success.to_string(),
            r.recognized_type.clone(),
            r.type_accuracy.to_string(),
            r.verification_result.clone(),
            r.success_accuracy.to_string(),
            format!("{:.3}", r.total_time),
            format!("{:.3}", r.translate_time),
            format!("{:.3}", r.config_time),
            format!("{:.3}", r.verify_time),
            r.errors.join("; "),
            r.timestamp.clone(),
        ];
        let row: Vec<String> = fields.iter().map(|f| report::csv_escape(f)).collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_suite_covers_all_five_categories() {
        let tags: BTreeSet<&str> = suite().iter().map(|c| c.expected_category.tag()).collect();
        assert_eq!(
            tags,
            BTreeSet::from(["SD", "AD", "GW", "CP", "SC"])
        );
    }

    #[test]
    fn test_suite_has_twenty_cases_with_negatives_per_category() {
        let cases = suite();
        assert_eq!(cases.len(), 20);
        for category in Category::all() {
            assert!(
                cases
                    .iter()
                    .any(|c| c.expected_category == category && !c.expected_success),
                "no failing case for {}",
                category
            );
        }
    }

    #[test]
    fn test_csv_row_count_and_header() {
        let record = TestRecord {
            test_id: "iter_1_test_1".to_string(),
            requirement: "Configure MQTT, topic a/b".to_string(),
            description: "desc, with comma".to_string(),
            category: "MQTT_Standard".to_string(),
            expected_type: "CP".to_string(),
            expected_success: true,
            recognized_type: "CP".to_string(),
            translation: String::new(),
            translate_time: 1.5,
            configuration: String::new(),
            config_time: 2.5,
            verification_result: "Successful".to_string(),
            verification_success: true,
            verify_time: 0.01,
            total_time: 4.2,
            type_accuracy: true,
            success_accuracy: true,
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            errors: vec![],
            error: None,
        };

        let csv = records_to_csv(&[record]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Test ID,Category,"));
        assert!(lines[1].contains(r#""desc, with comma""#));
        assert!(lines[1].contains("Successful"));
    }
}
