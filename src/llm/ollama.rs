//! Ollama `/api/generate` client.
//!
//! Requests are non-streaming: one prompt in, one JSON object out. The body
//! is decoded whatever the status code, so an Ollama error object (which has
//! no `response` field) surfaces as `Ok(None)` rather than an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::config::LlmConfig;
use super::types::{LlmError, LlmGenerate};

pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Build a client from parsed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone(), model: config.model.clone() })
    }

    /// Build a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::new(&LlmConfig::from_env()?)
    }

    /// Return the configured model name (e.g. `"llama3"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest { model: &self.model, prompt, stream: false };
        let response = self
            .http
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;
        parse_generate_response(status, &text)
    }
}

#[async_trait::async_trait]
impl LlmGenerate for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.send_generate(prompt).await
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

fn parse_generate_response(status: u16, text: &str) -> Result<Option<String>, LlmError> {
    match serde_json::from_str::<GenerateResponse>(text) {
        Ok(body) => Ok(body.response),
        Err(_) if status != 200 => Err(LlmError::ApiResponse { status, body: text.to_string() }),
        Err(e) => Err(LlmError::ApiParse(e.to_string())),
    }
}

#[cfg(test)]
#[path = "ollama_test.rs"]
mod tests;
