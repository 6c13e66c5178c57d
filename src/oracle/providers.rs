use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::CompletionOracle;
use crate::config::OracleConfig;
use crate::error::OracleError;
use crate::types::{ChatMessage, Role};

fn build_client(timeout_secs: u64) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build http client: {e}"))
}

fn require_api_key(config: &OracleConfig) -> anyhow::Result<String> {
    config.api_key.clone().ok_or_else(|| {
        anyhow::anyhow!(
            "oracle api key not set: configure [oracle].api_key or the provider's env var"
        )
    })
}

// ---------------------------------------------------------------------
// OpenAI-compatible chat completions
// ---------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct OpenAiOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiOracle {
    pub fn new(config: &OracleConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: require_api_key(config)?,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionOracle for OpenAiOracle {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OracleError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, messages = messages.len(), "oracle call");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api { status, body });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        if content.is_empty() {
            return Err(OracleError::EmptyCompletion);
        }
        Ok(content)
    }
}

// ---------------------------------------------------------------------
// Anthropic messages API
// ---------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<OwnedWireMessage>,
}

#[derive(Debug, Serialize)]
struct OwnedWireMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicBlock>,
}

#[derive(Debug, Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: String,
}

pub struct AnthropicOracle {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicOracle {
    pub fn new(config: &OracleConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: require_api_key(config)?,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// The messages API has no `system` role: the leading run of system
    /// messages travels in the `system` parameter, later system turns
    /// (transient reminders, status directives) are folded into user
    /// turns, and consecutive same-role turns are merged.
    fn split_transcript(messages: &[ChatMessage]) -> (Option<String>, Vec<OwnedWireMessage>) {
        let leading = messages
            .iter()
            .take_while(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>();
        let system = if leading.is_empty() {
            None
        } else {
            Some(leading.join("\n\n"))
        };

        let mut wire: Vec<OwnedWireMessage> = Vec::new();
        for message in messages.iter().skip_while(|m| m.role == Role::System) {
            let role = match message.role {
                Role::Assistant => "assistant",
                Role::User | Role::System => "user",
            };
            match wire.last_mut() {
                Some(last) if last.role == role => {
                    last.content.push_str("\n\n");
                    last.content.push_str(&message.content);
                }
                _ => wire.push(OwnedWireMessage {
                    role,
                    content: message.content.clone(),
                }),
            }
        }
        (system, wire)
    }
}

#[async_trait]
impl CompletionOracle for AnthropicOracle {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OracleError> {
        let (system, wire) = Self::split_transcript(messages);
        let request = AnthropicRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system,
            messages: wire,
        };

        let url = format!("{}/v1/messages", self.base_url);
        debug!(model = %self.model, messages = messages.len(), "oracle call");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OracleError::Api { status, body });
        }

        let completion: AnthropicResponse = response.json().await?;
        let content = completion
            .content
            .into_iter()
            .map(|b| b.text)
            .collect::<Vec<_>>()
            .join("");

        if content.is_empty() {
            return Err(OracleError::EmptyCompletion);
        }
        Ok(content)
    }
}
