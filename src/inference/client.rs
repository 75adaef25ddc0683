//! HTTP client for the hosted inference router.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::InferenceError;

use super::generator::{GenerationParams, TextGenerator};

/// OpenAI-compatible chat-completions route of the Hugging Face router.
const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";

/// Environment variable holding the API credential.
pub const API_KEY_VAR: &str = "HUGGINGFACE_API_KEY";

/// Client for the hosted inference endpoint.
pub struct HuggingFaceClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against a non-default endpoint. Tests point this at a local
    /// mock server.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build a client from the environment.
    ///
    /// `.env` has already been loaded by the time this runs, so the variable
    /// covers both sources. A missing or blank credential fails here, before
    /// any request is attempted.
    pub fn from_env() -> Result<Self, InferenceError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(InferenceError::MissingApiKey),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError> {
        let request = ChatRequest {
            model: &params.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        debug!(
            "requesting completion: model={} temperature={} max_tokens={}",
            params.model, params.temperature, params.max_tokens
        );

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(InferenceError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(InferenceError::Provider {
                status: status.as_u16(),
                message: message.trim().to_string(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(InferenceError::Network)?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or(InferenceError::EmptyCompletion)?;

        Ok(choice.message.content)
    }
}
