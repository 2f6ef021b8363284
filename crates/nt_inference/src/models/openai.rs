use std::fmt;
use std::time::Duration;
use async_trait::async_trait;
use nt_core::config::DEFAULT_OPENAI_MODEL;
use nt_core::{CompletionModel, CompletionRequest, Config, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<Message>,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl From<&Config> for OpenAiConfig {
    fn from(config: &Config) -> Self {
        let defaults = Self::default();
        Self {
            base_url: config.openai_base_url.clone().unwrap_or(defaults.base_url),
            model: config.openai_model.clone(),
            timeout: defaults.timeout,
        }
    }
}

/// Chat-completions client for OpenAI and compatible endpoints.
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiModel {
    pub fn new(client: Client, api_key: &str, config: OpenAiConfig) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Configuration("OpenAI API key is required".to_string()));
        }
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            config,
        })
    }
}

impl fmt::Debug for OpenAiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

#[async_trait]
impl CompletionModel for OpenAiModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage { role: "system", content: &request.system },
                ChatMessage { role: "user", content: &request.user },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self.client
            .post(format!("{}/chat/completions", self.config.base_url.trim_end_matches('/')))
            .bearer_auth(&self.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Summarization(format!("Completion request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(Error::Summarization(format!(
                "Completion API returned status {}: {}",
                status.as_u16(),
                text.chars().take(200).collect::<String>()
            )));
        }

        let response = response
            .json::<ChatResponse>()
            .await
            .map_err(|e| Error::Summarization(format!("Malformed completion response: {}", e)))?;

        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}
