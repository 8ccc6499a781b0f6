//! Generic OpenAI-compatible LLM client
//!
//! Supports any provider using OpenAI's chat completions format (Mistral, OpenAI, local
//! llama.cpp servers, etc.)

use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use url::Url;

use docsynth_core::{DocsynthError, LlmRequest, LlmResponse, Message, Runnable};

/// Request body for chat completions endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    http: Client,
    base_url: Url,
    api_key: SecretString,
    default_model: String,
    max_temperature: f32,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    pub fn set_default_model(&mut self, model: impl Into<String>) {
        self.default_model = model.into();
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Highest sampling temperature this backend accepts.
    pub fn max_temperature(&self) -> f32 {
        self.max_temperature
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.as_str().trim_end_matches('/')
        )
    }

    fn check_temperature(&self, temperature: Option<f32>) -> Result<(), DocsynthError> {
        match temperature {
            Some(t) if !t.is_finite() || !(0.0..=self.max_temperature).contains(&t) => {
                Err(DocsynthError::InvalidTemperature(t))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl Runnable<LlmRequest, LlmResponse> for OpenAiCompatibleClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, DocsynthError> {
        self.check_temperature(input.temperature)?;

        let LlmRequest {
            model,
            messages,
            temperature,
        } = input;
        let model = if model.is_empty() {
            self.default_model.clone()
        } else {
            model
        };
        let request = ChatCompletionRequest {
            model,
            messages,
            temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        tracing::debug!(model = %request.model, temperature = ?request.temperature, "chat completion request");
        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|err| DocsynthError::LlmProvider(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<OpenAiError>(&body)
                .map(|err| err.error.message)
                .unwrap_or(body);
            return Err(DocsynthError::LlmProvider(format!("{status}: {reason}")));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| DocsynthError::LlmProvider(err.to_string()))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| DocsynthError::LlmProvider("response contained no content".to_string()))?;

        Ok(LlmResponse { content })
    }
}

#[derive(Default)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    default_model: Option<String>,
    timeout: Option<Duration>,
    max_temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiCompatibleBuilder {
    pub fn base_url(mut self, url: &str) -> Result<Self, DocsynthError> {
        let parsed = Url::parse(url)
            .map_err(|err| DocsynthError::InvalidConfig(format!("invalid base url '{url}': {err}")))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into()));
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn max_temperature(mut self, max_temperature: f32) -> Self {
        self.max_temperature = Some(max_temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, DocsynthError> {
        let base_url = self
            .base_url
            .ok_or_else(|| DocsynthError::InvalidConfig("base url is required".to_string()))?;
        let api_key = self
            .api_key
            .ok_or_else(|| DocsynthError::InvalidConfig("api key is required".to_string()))?;
        if api_key.expose_secret().trim().is_empty() {
            return Err(DocsynthError::InvalidConfig("api key is empty".to_string()));
        }
        let default_model = self
            .default_model
            .ok_or_else(|| DocsynthError::InvalidConfig("default model is required".to_string()))?;

        let http = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(120)))
            .build()
            .map_err(|err| DocsynthError::InvalidConfig(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            http,
            base_url,
            api_key,
            default_model,
            max_temperature: self.max_temperature.unwrap_or(2.0),
            max_tokens: self.max_tokens,
        })
    }
}
