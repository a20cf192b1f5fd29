//! The requirement pipeline: translate, configure, verify.
//!
//! Stage 1 turns a natural-language IoT requirement into a category tag plus
//! configuration steps (translator prompt, topology snapshot as context).
//! Stage 2 turns the full stage-1 reply into a concrete configuration
//! (configurator prompt). Stage 3 ships the configuration to veriotd for
//! verification. Per-stage wall times are recorded for the bench collector.

use crate::client::VerifierClient;
use crate::prompts::PromptSet;
use anyhow::{Context, Result};
use serde_json::Value;
use std::time::Instant;
use veriot_common::ollama::OllamaClient;
use veriot_common::{Category, VerifyResponse};

/// Fixed instruction appended after the topology context in the translator
/// system prompt. Keeps the model from padding the tag with prose.
const TRANSLATOR_SUFFIX: &str = "\n Use this information to gather relevant IoT information \
for the {requirements} goal. You are not authorized to make explanations of any type.";

/// Wall-clock seconds per stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageTimings {
    pub translate_secs: f64,
    pub configure_secs: f64,
    pub verify_secs: f64,
    pub total_secs: f64,
}

/// Outcome of one pipeline run.
///
/// `category` is the tag the run proceeded with (extracted or fallback).
/// When it is `None` the run stopped after translation and the later fields
/// stay empty.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub requirement: String,
    pub translation: String,
    pub category: Option<Category>,
    pub configuration: Option<String>,
    pub verification: Option<VerifyResponse>,
    pub timings: StageTimings,
}

/// The three-stage pipeline with its collaborators.
pub struct Pipeline {
    translator_llm: OllamaClient,
    configurator_llm: OllamaClient,
    verifier: VerifierClient,
    prompts: PromptSet,
    model: String,
}

impl Pipeline {
    pub fn new(
        llm_base_url: &str,
        model: &str,
        translate_timeout_ms: u64,
        configure_timeout_ms: u64,
        verifier: VerifierClient,
        prompts: PromptSet,
    ) -> Self {
        Self {
            translator_llm: OllamaClient::with_url(llm_base_url)
                .with_timeout(translate_timeout_ms),
            configurator_llm: OllamaClient::with_url(llm_base_url)
                .with_timeout(configure_timeout_ms),
            verifier,
            prompts,
            model: model.to_string(),
        }
    }

    pub fn verifier(&self) -> &VerifierClient {
        &self.verifier
    }

    /// Run the full pipeline for one requirement.
    ///
    /// `fallback` is used when no category tag can be extracted from the
    /// translation: the bench collector passes `CP` to keep runs comparable,
    /// the interactive shell passes `None` and skips the request.
    pub async fn run(&self, requirement: &str, fallback: Option<Category>) -> Result<PipelineRun> {
        let start = Instant::now();
        let mut timings = StageTimings::default();

        // Best-effort topology context; translation still works without it.
        let topology_context = match self.verifier.topology().await {
            Ok(topology) => serde_json::to_string(&topology).unwrap_or_else(|_| "{}".to_string()),
            Err(_) => "{}".to_string(),
        };
        let translator_prompt = build_translator_prompt(&self.prompts.translator, &topology_context);

        let translate_start = Instant::now();
        let translation = self
            .translator_llm
            .chat(&self.model, &translator_prompt, requirement)
            .await
            .context("translation stage")?;
        timings.translate_secs = translate_start.elapsed().as_secs_f64();

        let category = Category::extract(&translation).or(fallback);
        let Some(category) = category else {
            timings.total_secs = start.elapsed().as_secs_f64();
            return Ok(PipelineRun {
                requirement: requirement.to_string(),
                translation,
                category: None,
                configuration: None,
                verification: None,
                timings,
            });
        };

        let configure_start = Instant::now();
        let configuration = self
            .configurator_llm
            .chat(&self.model, &self.prompts.configurator, &translation)
            .await
            .context("configuration stage")?;
        timings.configure_secs = configure_start.elapsed().as_secs_f64();

        let verify_start = Instant::now();
        let verification = self
            .verifier
            .verify(category.tag(), Value::String(configuration.clone()))
            .await
            .context("verification stage")?;
        timings.verify_secs = verify_start.elapsed().as_secs_f64();
        timings.total_secs = start.elapsed().as_secs_f64();

        Ok(PipelineRun {
            requirement: requirement.to_string(),
            translation,
            category: Some(category),
            configuration: Some(configuration),
            verification: Some(verification),
            timings,
        })
    }
}

/// Translator system prompt: template, then the serialized topology snapshot,
/// then the fixed instruction suffix.
fn build_translator_prompt(template: &str, topology_context: &str) -> String {
    format!("{}{}{}", template, topology_context, TRANSLATOR_SUFFIX)
}
