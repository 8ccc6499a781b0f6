//! Mistral LLM client

use std::time::Duration;

use docsynth_core::{DocsynthError, LlmRequest, LlmResponse, Runnable};

use crate::openai_compatible::OpenAiCompatibleClient;

pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai";
pub const MISTRAL_DEFAULT_MODEL: &str = "mistral-large-latest";
/// Mistral rejects sampling temperatures above this value.
pub const MISTRAL_MAX_TEMPERATURE: f32 = 1.5;

/// Mistral chat client
#[derive(Clone)]
pub struct MistralClient(OpenAiCompatibleClient);

impl MistralClient {
    /// Create a new Mistral client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, DocsynthError> {
        Self::with_base_url(api_key, MISTRAL_BASE_URL)
    }

    /// Point the client at a different host, e.g. a proxy or a test server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, DocsynthError> {
        let client = OpenAiCompatibleClient::builder()
            .base_url(base_url)?
            .api_key(api_key)
            .default_model(MISTRAL_DEFAULT_MODEL)
            .max_temperature(MISTRAL_MAX_TEMPERATURE)
            .timeout(Duration::from_secs(300))
            .build()?;
        Ok(Self(client))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }

    pub fn model(&self) -> &str {
        self.0.default_model()
    }
}

#[async_trait::async_trait]
impl Runnable<LlmRequest, LlmResponse> for MistralClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, DocsynthError> {
        self.0.invoke(input).await
    }
}
