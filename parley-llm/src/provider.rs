//! Provider trait for abstracting different LLM providers.

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("OpenRouter API returned status {status}: {message}")]
    ApiError { status: u16, message: String },
    #[error("No OpenRouter API key configured. Set OPENROUTER_API_KEY")]
    MissingApiKey,
}

/// Provider trait for different LLM backends
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Send a simple single-turn message and get the assistant's reply text.
    async fn send_message(&self, message: &str) -> Result<String, ProviderError>;

    /// Clone the provider (boxed)
    fn clone_box(&self) -> Box<dyn Provider>;
}

impl Clone for Box<dyn Provider> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
