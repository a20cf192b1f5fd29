//! Interactive requirement shell.
//!
//! Reads IoT requirements from stdin, runs the pipeline per line, and prints
//! each stage's output. A request the translator cannot classify is skipped,
//! not failed; pipeline errors are reported and the loop continues.

use crate::client::VerifierClient;
use crate::config::Config;
use crate::pipeline::{Pipeline, PipelineRun};
use crate::prompts::PromptSet;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};
use std::path::Path;

pub async fn run(config: &Config) -> Result<()> {
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

    println!("{}", style("IoT Configuration Validation Service").bold());
    println!("Model: {}  Verifier: {}", config.llm.model, config.verifier.base_url);
    println!("Enter 'quit' to exit");
    println!("{}", "-".repeat(50));

    let stdin = io::stdin();
    loop {
        print!("{} ", style("IoT Requirement:").cyan());
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let requirement = line.trim();

        if requirement.is_empty() {
            continue;
        }
        if matches!(requirement.to_lowercase().as_str(), "quit" | "exit" | "q") {
            println!("Exiting");
            break;
        }

        match pipeline.run(requirement, None).await {
            Ok(run) => print_run(&run),
            Err(e) => {
                eprintln!("{} {:#}", style("Pipeline error:").red(), e);
            }
        }
    }

    Ok(())
}

pub fn print_run(run: &PipelineRun) {
    section("Translation");
    println!("{}", run.translation.trim());

    let Some(category) = run.category else {
        println!();
        println!(
            "{}",
            style("No valid verification type in the translation, skipping request").yellow()
        );
        return;
    };

    if let Some(configuration) = &run.configuration {
        section(&format!("Configuration [{}]", category));
        println!("{}", configuration.trim());
    }

    if let Some(verification) = &run.verification {
        section("Verification");
        if verification.result.is_success() {
            println!("{}", style(verification.result.as_str()).green().bold());
        } else {
            println!("{}", style(verification.result.as_str()).red().bold());
        }
        for error in &verification.errors {
            println!("  {} {}", style("error:").red(), error);
        }
        for warning in &verification.warnings {
            println!("  {} {}", style("warning:").yellow(), warning);
        }
    }

    println!();
    println!(
        "translate {:.1}s | configure {:.1}s | verify {:.2}s | total {:.1}s",
        run.timings.translate_secs,
        run.timings.configure_secs,
        run.timings.verify_secs,
        run.timings.total_secs
    );
}

fn section(title: &str) {
    println!();
    println!("{} {}", style("----").dim(), style(title).bold());
}
