//! OpenRouter API client with OpenAI-compatible format.

use parley_core::{Secrets, SecretsError};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::provider::{Provider, ProviderError};

/// Default model identifier sent with every request.
pub const DEFAULT_MODEL: &str = "google/gemma-3n-e4b-it:free";

/// Default OpenRouter API base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Reply returned when the upstream response carries no recognizable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't get a response from the model.";

/// OpenRouter API client
#[derive(Clone)]
pub struct OpenRouterClient {
    http_client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    http_referer: Option<String>,
    app_name: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

/// Request body for the Chat Completions API
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// OpenAI-compatible message format
#[derive(Debug, Serialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client with the default model and base URL.
    pub fn new(api_key: impl Into<String>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            http_referer: None,
            app_name: None,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a client configured from the environment.
    ///
    /// Reads `OPENROUTER_API_KEY` from the environment, honoring a `.env`
    /// file for development.
    pub fn from_env() -> Result<Self, SecretsError> {
        let secrets = Secrets::from_env()?;
        Ok(Self::new(secrets.openrouter_api_key.unwrap_or_default()))
    }

    /// Update the model for this client
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL (points tests at a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Set the `HTTP-Referer` attribution header sent to OpenRouter.
    pub fn with_http_referer(mut self, referer: impl Into<String>) -> Self {
        self.http_referer = Some(referer.into());
        self
    }

    /// Set the `X-Title` attribution header sent to OpenRouter.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    /// Set the sampling temperature sent with each request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the number of tokens the model may generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Build request headers with optional attribution
    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let auth_value = format!("Bearer {}", self.api_key);
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).expect("Invalid API key format"),
        );

        // Optional headers for OpenRouter rankings
        if let Some(ref referer) = self.http_referer
            && let Ok(value) = HeaderValue::from_str(referer)
        {
            headers.insert("HTTP-Referer", value);
        }
        if let Some(ref app_name) = self.app_name
            && let Ok(value) = HeaderValue::from_str(app_name)
        {
            headers.insert("X-Title", value);
        }

        headers
    }
}

/// Reply extractors tried in order against the first `choices` entry.
///
/// The OpenAI-compatible `message.content` field wins; some models still
/// answer in the legacy completions shape with a top-level `text` field.
const REPLY_EXTRACTORS: &[fn(&Value) -> Option<&str>] = &[message_content, legacy_text];

fn message_content(choice: &Value) -> Option<&str> {
    choice.get("message")?.get("content")?.as_str()
}

fn legacy_text(choice: &Value) -> Option<&str> {
    choice.get("text")?.as_str()
}

/// Extract the assistant's reply text from a chat completions payload.
fn extract_reply(payload: &Value) -> Option<&str> {
    let choice = payload.get("choices")?.as_array()?.first()?;
    REPLY_EXTRACTORS.iter().find_map(|extract| extract(choice))
}

#[async_trait::async_trait]
impl Provider for OpenRouterClient {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn send_message(&self, message: &str) -> Result<String, ProviderError> {
        if self.api_key.trim().is_empty() {
            error!("OpenRouter API key is not configured");
            return Err(ProviderError::MissingApiKey);
        }

        let url = format!("{}/chat/completions", self.base_url);

        let request_body = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: vec![OpenAiMessage {
                role: "user".to_string(),
                content: message.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http_client
            .post(&url)
            .headers(self.build_headers())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("OpenRouter request failed: {e}");
                e
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!("OpenRouter API error: {status} {error_text}");
            return Err(ProviderError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let payload: Value = response.json().await.map_err(|e| {
            error!("Failed to parse OpenRouter response: {e}");
            e
        })?;

        match extract_reply(&payload) {
            Some(reply) => Ok(reply.to_string()),
            None => {
                warn!("Unexpected OpenRouter response shape: {payload}");
                Ok(FALLBACK_REPLY.to_string())
            }
        }
    }

    fn clone_box(&self) -> Box<dyn Provider> {
        Box::new(self.clone())
    }
}
