//! The generation seam: parameters and the mockable trait.

use async_trait::async_trait;

use crate::config::Config;
use crate::error::InferenceError;

/// Generation parameters resolved from configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl GenerationParams {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }
}

/// Narrow seam over the hosted inference call.
///
/// Command orchestration depends on this trait rather than on the concrete
/// HTTP client, so tests can substitute fakes without network access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a prompt. One request, no retries: the first
    /// failure surfaces to the caller.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, InferenceError>;
}
