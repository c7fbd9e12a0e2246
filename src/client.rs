//! Chat-completions text generator
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. Defaults
//! target DeepSeek (`deepseek-chat`), configured from the environment.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{GenerationError, Result};
use crate::generator::TextGenerator;

pub const API_KEY_VAR: &str = "DEEPSEEK_API_KEY";
pub const BASE_URL_VAR: &str = "DEEPSEEK_BASE_URL";
pub const MODEL_VAR: &str = "DEEPSEEK_MODEL";

pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";
pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant";

/// Configuration for the chat-completions client
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// API base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// API key (from environment)
    pub api_key: String,

    /// Model to use (default: deepseek-chat)
    pub model: String,

    /// System message sent ahead of every prompt
    pub system_prompt: String,

    /// Whole-request timeout. `None` waits as long as the backend takes.
    pub timeout: Option<Duration>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key: std::env::var(API_KEY_VAR).unwrap_or_default(),
            model: std::env::var(MODEL_VAR).unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            timeout: None,
        }
    }
}

impl ChatConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Text generator backed by an HTTP chat-completions API
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        if self.config.api_key.is_empty() {
            return Err(GenerationError::MissingCredential { var: API_KEY_VAR });
        }

        let request_body = build_request(&self.config, prompt);

        let api_response = self
            .http
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = api_response.status();
        if !status.is_success() {
            let body = api_response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = api_response.text().await?;
        tracing::debug!(model = %self.config.model, bytes = body.len(), "completion received");

        parse_completion(&body)
    }
}

fn build_request<'a>(config: &'a ChatConfig, prompt: &'a str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: [
            ChatMessage {
                role: "system",
                content: &config.system_prompt,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
        stream: false,
    }
}

/// Pull `choices[0].message.content` out of a completion body
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| {
            GenerationError::MalformedResponse("missing choices[0].message.content".to_string())
        })?;

    if content.trim().is_empty() {
        return Err(GenerationError::EmptyCompletion);
    }

    Ok(content)
}
