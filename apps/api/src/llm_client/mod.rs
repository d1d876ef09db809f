/// LLM Client: the single point of entry for text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the generation service directly.
/// Callers depend on the `TextGenerator` trait; `LlmClient` is the production
/// implementation over an OpenAI-compatible chat-completions endpoint.
///
/// No retries: a failed call surfaces once and the caller decides what to do.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
/// Output budget for a single completion, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 2000;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key was provided")]
    MissingCredential,

    #[error("the API key was rejected: {0}")]
    Authentication(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("completion was cut off after {max_tokens} tokens")]
    Truncated { max_tokens: u32 },
}

/// Anything that can turn a system + user prompt into a completion.
///
/// Carried as `Arc<dyn TextGenerator>` so tests can swap in a deterministic stub.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError>;
}

/// Connection settings for `LlmClient`. The credential lives here and is never logged.
#[derive(Clone)]
pub struct LlmSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Text of the first choice. A truncated completion, a missing choice or
    /// `null` content is an error; an empty string is a valid (empty) contract.
    pub fn into_text(self) -> Result<String, LlmError> {
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyContent)?;

        if choice.finish_reason.as_deref() == Some("length") {
            return Err(LlmError::Truncated {
                max_tokens: MAX_OUTPUT_TOKENS,
            });
        }

        choice.message.content.ok_or(LlmError::EmptyContent)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client. One instance per credential.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        if settings.api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential);
        }
        let client = Client::builder().timeout(settings.timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }

    fn request_body<'a>(&'a self, system: &'a str, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Makes a single call to the chat-completions API and returns the decoded response.
    pub async fn call(&self, system: &str, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = self.request_body(system, prompt);

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.settings.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("LLM API returned {}", status);
            return Err(map_error(status.as_u16(), &body));
        }

        let chat: ChatResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }
}

#[async_trait]
impl TextGenerator for LlmClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let text = self.call(system, prompt).await?.into_text();
        if let Err(LlmError::Truncated { max_tokens }) = &text {
            warn!(max_tokens, "Completion hit the output budget before finishing");
        }
        text
    }
}

/// Converts a non-2xx response into an error, preferring the service's own message.
fn map_error(status: u16, body: &str) -> LlmError {
    let message = serde_json::from_str::<ApiErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        401 | 403 => LlmError::Authentication(message),
        _ => LlmError::Api { status, message },
    }
}
