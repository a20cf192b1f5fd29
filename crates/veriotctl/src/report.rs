//! Benchmark statistics: aggregation, summary rendering, CSV round-trip.
//!
//! Used directly after a bench run and standalone via `veriotctl report` on a
//! previously written CSV. Pure presentation; the numbers carry no decisions.

use anyhow::{bail, Context, Result};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use veriot_common::Category;

/// The per-record slice of data the statistics need.
#[derive(Debug, Clone)]
pub struct RecordView {
    /// Expected category tag (SD/AD/GW/CP/SC).
    pub expected_type: String,
    /// True when the pipeline errored before reaching a verdict.
    pub errored: bool,
    pub type_accuracy: bool,
    pub success_accuracy: bool,
    pub total_secs: f64,
}

/// Per-category accuracy counts.
#[derive(Debug, Clone, Default)]
pub struct TypeStats {
    pub total: usize,
    pub completed: usize,
    pub type_accurate: usize,
    pub success_accurate: usize,
}

/// Aggregated benchmark statistics.
#[derive(Debug, Clone)]
pub struct BenchSummary {
    pub total: usize,
    pub completed: usize,
    pub type_accurate: usize,
    pub success_accurate: usize,
    pub min_secs: f64,
    pub avg_secs: f64,
    pub max_secs: f64,
    pub by_type: BTreeMap<String, TypeStats>,
}

impl BenchSummary {
    /// Aggregate the records; `None` when there is nothing to aggregate.
    pub fn compute(records: &[RecordView]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let mut by_type: BTreeMap<String, TypeStats> = BTreeMap::new();
        let mut completed = 0;
        let mut type_accurate = 0;
        let mut success_accurate = 0;
        let mut times: Vec<f64> = Vec::new();

        for record in records {
            let stats = by_type.entry(record.expected_type.clone()).or_default();
            stats.total += 1;

            if !record.errored {
                completed += 1;
                stats.completed += 1;
                if record.total_secs > 0.0 {
                    times.push(record.total_secs);
                }
            }
            if record.type_accuracy {
                type_accurate += 1;
                stats.type_accurate += 1;
            }
            if record.success_accuracy {
                success_accurate += 1;
                stats.success_accurate += 1;
            }
        }

        let (min_secs, avg_secs, max_secs) = if times.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = times.iter().sum();
            let min = times.iter().cloned().fold(f64::INFINITY, f64::min);
            let max = times.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            (min, sum / times.len() as f64, max)
        };

        Some(Self {
            total: records.len(),
            completed,
            type_accurate,
            success_accurate,
            min_secs,
            avg_secs,
            max_secs,
            by_type,
        })
    }

    pub fn type_accuracy_pct(&self) -> f64 {
        percentage(self.type_accurate, self.total)
    }

    pub fn success_accuracy_pct(&self) -> f64 {
        percentage(self.success_accurate, self.total)
    }
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Print the statistics summary to stdout.
pub fn print_summary(summary: &BenchSummary) {
    println!();
    println!("{}", "=".repeat(70));
    println!("{}", "Performance Statistics Report".bold());
    println!("{}", "=".repeat(70));

    let errored = summary.total - summary.completed;
    println!("Basic statistics:");
    println!("  Total tests:      {}", summary.total);
    println!(
        "  Completed tests:  {} ({:.1}%)",
        summary.completed,
        percentage(summary.completed, summary.total)
    );
    println!(
        "  Errored tests:    {} ({:.1}%)",
        errored,
        percentage(errored, summary.total)
    );

    println!();
    println!("Accuracy statistics:");
    println!(
        "  Type recognition:        {}/{} ({:.1}%)",
        summary.type_accurate,
        summary.total,
        summary.type_accuracy_pct()
    );
    println!(
        "  Verification result:     {}/{} ({:.1}%)",
        summary.success_accurate,
        summary.total,
        summary.success_accuracy_pct()
    );

    if summary.avg_secs > 0.0 {
        println!();
        println!("Time statistics:");
        println!("  Average response time: {:.2}s", summary.avg_secs);
        println!("  Minimum response time: {:.2}s", summary.min_secs);
        println!("  Maximum response time: {:.2}s", summary.max_secs);
    }

    println!();
    println!("Per-category statistics:");
    println!(
        "  {:4} {:26} {:>6} {:>10} {:>10} {:>12}",
        "Tag", "Category", "Tests", "Completed", "TypeAcc", "VerifyAcc"
    );
    println!("  {}", "-".repeat(72));
    for (tag, stats) in &summary.by_type {
        let name = Category::from_tag(tag).map_or("Unknown", |c| c.name());
        println!(
            "  {:4} {:26} {:>6} {:>9.1}% {:>9.1}% {:>11.1}%",
            tag,
            name,
            stats.total,
            percentage(stats.completed, stats.total),
            percentage(stats.type_accurate, stats.total),
            percentage(stats.success_accurate, stats.total),
        );
    }
    println!("{}", "=".repeat(70));
}

/// `veriotctl report --csv <file>` entry point.
pub fn run_report(csv_path: &Path) -> Result<()> {
    let records = load_csv(csv_path)?;
    match BenchSummary::compute(&records) {
        Some(summary) => {
            println!("Report for {} ({} records)", csv_path.display(), records.len());
            print_summary(&summary);
            Ok(())
        }
        None => bail!("No records in {}", csv_path.display()),
    }
}

// CSV report columns, by index.
const COL_EXPECTED_TYPE: usize = 4;
const COL_TYPE_ACCURACY: usize = 7;
const COL_VERIFICATION_RESULT: usize = 8;
const COL_SUCCESS_ACCURACY: usize = 9;
const COL_TOTAL_TIME: usize = 10;
const CSV_COLUMNS: usize = 16;

/// Load a bench report CSV back into record views.
pub fn load_csv(path: &Path) -> Result<Vec<RecordView>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut rows = parse_csv(&content);
    if rows.is_empty() {
        bail!("{} is empty", path.display());
    }

    // Drop the header row.
    rows.remove(0);

    let mut records = Vec::new();
    for (line, row) in rows.iter().enumerate() {
        if row.len() < CSV_COLUMNS {
            bail!(
                "{} line {}: expected {} columns, found {}",
                path.display(),
                line + 2,
                CSV_COLUMNS,
                row.len()
            );
        }
        records.push(RecordView {
            expected_type: row[COL_EXPECTED_TYPE].clone(),
            // A record that never reached the verifier has no result string.
            errored: row[COL_VERIFICATION_RESULT].is_empty(),
            type_accuracy: row[COL_TYPE_ACCURACY] == "true",
            success_accuracy: row[COL_SUCCESS_ACCURACY] == "true",
            total_secs: row[COL_TOTAL_TIME].parse().unwrap_or(0.0),
        });
    }
    Ok(records)
}

/// Quote a CSV field per RFC 4180 when it needs it.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Minimal RFC-4180 parser for the report files this tool writes.
pub fn parse_csv(content: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => {
                    row.push(std::mem::take(&mut field));
                }
                '\r' => {}
                '\n' => {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
                _ => field.push(c),
            }
        }
    }

    // Final row without a trailing newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
