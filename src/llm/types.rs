//! LLM types — errors and the provider-neutral generate trait.

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by LLM client operations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    ConfigParse(String),

    /// The HTTP request to the LLM provider failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The provider returned a non-success status without a usable body.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The provider response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// LLM GENERATE TRAIT
// =============================================================================

/// Single-prompt text generation. Enables mocking in tests.
#[async_trait::async_trait]
pub trait LlmGenerate: Send + Sync {
    /// Send `prompt` to the model and return its completion.
    ///
    /// `Ok(None)` means the provider answered but included no completion text.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is not
    /// valid JSON.
    async fn generate(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}
