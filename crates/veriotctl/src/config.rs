//! Configuration for veriotctl.
//!
//! Loads settings from ~/.config/veriot/ctl.toml or uses defaults. Missing
//! file means defaults; a malformed file is an error the user should see.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Verifier daemon endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierConfig {
    /// Base URL of the veriotd HTTP API.
    #[serde(default = "default_verifier_url")]
    pub base_url: String,
}

fn default_verifier_url() -> String {
    "http://127.0.0.1:7410".to_string()
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            base_url: default_verifier_url(),
        }
    }
}

/// Language-model configuration for the two pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama API base URL.
    #[serde(default = "default_llm_url")]
    pub base_url: String,

    /// Model used for both translation and configuration.
    #[serde(default = "default_model")]
    pub model: String,

    /// Timeout for the translation stage (ms).
    #[serde(default = "default_translate_timeout_ms")]
    pub translate_timeout_ms: u64,

    /// Timeout for the configuration stage (ms). Longer: the configurator
    /// emits full configs, not a two-letter tag plus steps.
    #[serde(default = "default_configure_timeout_ms")]
    pub configure_timeout_ms: u64,
}

fn default_llm_url() -> String {
    veriot_common::ollama::OLLAMA_DEFAULT_URL.to_string()
}

fn default_model() -> String {
    "zephyr:7b-beta".to_string()
}

fn default_translate_timeout_ms() -> u64 {
    30_000
}

fn default_configure_timeout_ms() -> u64 {
    60_000
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_url(),
            model: default_model(),
            translate_timeout_ms: default_translate_timeout_ms(),
            configure_timeout_ms: default_configure_timeout_ms(),
        }
    }
}

/// Prompt template location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Directory holding translator.txt and configurator.txt.
    #[serde(default = "default_prompts_dir")]
    pub dir: String,
}

fn default_prompts_dir() -> String {
    "prompts".to_string()
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            dir: default_prompts_dir(),
        }
    }
}

/// Full CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub verifier: VerifierConfig,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub prompts: PromptsConfig,
}

impl Config {
    /// Default config file path (~/.config/veriot/ctl.toml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("veriot").join("ctl.toml"))
    }

    /// Load the config file if present, defaults otherwise. A file that
    /// exists but does not parse is reported, not silently replaced.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::default_path() else {
            debug!("No config directory available, using defaults");
            return Ok(Config::default());
        };

        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.verifier.base_url, "http://127.0.0.1:7410");
        assert_eq!(config.llm.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.llm.model, "zephyr:7b-beta");
        assert_eq!(config.llm.translate_timeout_ms, 30_000);
        assert_eq!(config.llm.configure_timeout_ms, 60_000);
        assert_eq!(config.prompts.dir, "prompts");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
[llm]
model = "mistral:7b"

[prompts]
dir = "/etc/veriot/prompts"
"#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "mistral:7b");
        assert_eq!(config.llm.base_url, "http://127.0.0.1:11434");
        assert_eq!(config.prompts.dir, "/etc/veriot/prompts");
        assert_eq!(config.verifier.base_url, "http://127.0.0.1:7410");
    }
}
