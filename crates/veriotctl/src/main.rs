//! Veriot Control - CLI for the veriot pipeline.
//!
//! Drives the translate/configure/verify pipeline against a local Ollama
//! model and the veriotd verification daemon.

mod client;
mod collector;
mod config;
mod pipeline;
mod prompts;
mod report;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client::VerifierClient;
use config::Config;
use console::style;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "veriotctl")]
#[command(about = "LLM-driven IoT configuration pipeline", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive requirement shell
    Shell,

    /// Run the pipeline once for a single requirement
    Request {
        /// Natural-language IoT requirement
        requirement: String,
    },

    /// Show verifier daemon health and registry summary
    Status,

    /// Run the benchmark suite and write result files
    Bench {
        /// Number of iterations over the 20-case suite
        #[arg(long, default_value_t = 3)]
        iterations: u32,

        /// Directory for the JSON and CSV result files
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// Summarize a previously written bench CSV
    Report {
        /// Path to a bench_report_*.csv file
        #[arg(long)]
        csv: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Shell => shell::run(&config).await,
        Commands::Request { requirement } => request_once(&config, &requirement).await,
        Commands::Status => status(&config).await,
        Commands::Bench {
            iterations,
            output_dir,
        } => collector::run_bench(&config, iterations, &output_dir).await,
        Commands::Report { csv } => report::run_report(&csv),
    }
}

async fn request_once(config: &Config, requirement: &str) -> Result<()> {
    let prompts = prompts::PromptSet::load(std::path::Path::new(&config.prompts.dir))?;
    let verifier = VerifierClient::new(&config.verifier.base_url);
    let pipeline = pipeline::Pipeline::new(
        &config.llm.base_url,
        &config.llm.model,
        config.llm.translate_timeout_ms,
        config.llm.configure_timeout_ms,
        verifier,
        prompts,
    );

    let run = pipeline.run(requirement, None).await?;
    shell::print_run(&run);
    Ok(())
}

async fn status(config: &Config) -> Result<()> {
    let verifier = VerifierClient::new(&config.verifier.base_url);

    let health = verifier.health().await?;
    println!("{}", style("Verifier").bold());
    println!("  service:  {} v{}", health.service, health.version);
    println!("  status:   {}", health.status);
    println!("  uptime:   {}s", health.uptime_seconds);
    println!("  devices:  {}", health.devices_loaded);
    println!("  edges:    {}", health.topology_edges);

    let topology = verifier.topology().await?;
    if !topology.devices.is_empty() {
        println!();
        println!("{}", style("Registered devices").bold());
        for device_id in &topology.devices {
            println!("  {}", device_id);
        }
    }

    Ok(())
}
