//! Ollama local LLM client
//!
//! HTTP client for the local Ollama API, used by the translation and
//! configuration stages of the request pipeline. No cloud calls.
//!
//! Endpoints used:
//! - GET / - health check
//! - GET /api/tags - list available models
//! - POST /api/chat - chat completion (system + user messages)

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default Ollama API endpoint
pub const OLLAMA_DEFAULT_URL: &str = "http://127.0.0.1:11434";

/// Default timeout for health checks (ms)
pub const HEALTH_CHECK_TIMEOUT_MS: u64 = 2000;

/// Default timeout for chat completions (ms). Local 7B models on CPU can
/// take a while on long prompts.
pub const CHAT_TIMEOUT_MS: u64 = 120_000;

/// Errors from Ollama operations
#[derive(Debug, Error)]
pub enum OllamaError {
    #[error("Ollama not available: {0}")]
    NotAvailable(String),
    #[error("Model not found: {0}")]
    ModelNotFound(String),
    #[error("Request timed out")]
    Timeout,
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Chat error: {0}")]
    Chat(String),
}

/// Model info from /api/tags
#[derive(Debug, Clone, Deserialize)]
pub struct OllamaModel {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified_at: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

/// One chat message (role is "system", "user", or "assistant")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request for /api/chat
#[derive(Debug, Clone, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Response from /api/chat (non-streaming)
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub total_duration: u64,
    #[serde(default)]
    pub eval_count: u32,
}

/// Client for local LLM calls
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    timeout_ms: u64,
}

impl OllamaClient {
    /// Create a new client with the default URL
    pub fn new() -> Self {
        Self {
            base_url: OLLAMA_DEFAULT_URL.to_string(),
            timeout_ms: CHAT_TIMEOUT_MS,
        }
    }

    /// Create a client with a custom URL
    pub fn with_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            timeout_ms: CHAT_TIMEOUT_MS,
        }
    }

    /// Set the chat timeout in milliseconds
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the Ollama service is reachable
    pub async fn is_available(&self) -> bool {
        let client = match reqwest::Client::builder()
            .timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS))
            .build()
        {
            Ok(c) => c,
            Err(_) => return false,
        };

        match client.get(&self.base_url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    /// List available models
    pub async fn list_models(&self) -> Result<Vec<OllamaModel>, OllamaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(HEALTH_CHECK_TIMEOUT_MS))
            .build()
            .map_err(|e| OllamaError::Http(e.to_string()))?;

        let url = format!("{}/api/tags", self.base_url);
        let resp = client.get(&url).send().await.map_err(map_send_error)?;

        if !resp.status().is_success() {
            return Err(OllamaError::Http(format!("Status: {}", resp.status())));
        }

        let tags: TagsResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(tags.models)
    }

    /// Check if a specific model is downloaded
    pub async fn has_model(&self, model: &str) -> Result<bool, OllamaError> {
        let models = self.list_models().await?;
        Ok(models.iter().any(|m| model_matches(&m.name, model)))
    }

    /// One chat completion: a system prompt plus a user message.
    /// Returns the assistant's reply text.
    pub async fn chat(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, OllamaError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(self.timeout_ms))
            .build()
            .map_err(|e| OllamaError::Http(e.to_string()))?;

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
            stream: false,
        };

        let url = format!("{}/api/chat", self.base_url);
        let resp = client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            if status.as_u16() == 404 {
                return Err(OllamaError::ModelNotFound(model.to_string()));
            }
            return Err(OllamaError::Chat(format!("Status {}: {}", status, body)));
        }

        let chat_resp: ChatResponse = resp
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(chat_resp.message.content)
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

fn map_send_error(e: reqwest::Error) -> OllamaError {
    if e.is_timeout() {
        OllamaError::Timeout
    } else if e.is_connect() {
        OllamaError::NotAvailable(e.to_string())
    } else {
        OllamaError::Http(e.to_string())
    }
}

/// Match a downloaded model name against a requested one.
/// Names may carry a tag suffix ("zephyr:7b-beta"); the base name matches too.
fn model_matches(name: &str, wanted: &str) -> bool {
    if name == wanted {
        return true;
    }
    let name_base = name.split(':').next().unwrap_or(name);
    let wanted_base = wanted.split(':').next().unwrap_or(wanted);
    name_base == wanted_base
}
