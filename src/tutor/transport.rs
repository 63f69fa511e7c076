//! Chat-completion transport

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TutorConfig;
use crate::error::{Result, TutorError, MISSING_API_KEY};

/// Speaker of a conversation turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One `{role, content}` turn
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A single completion request
#[derive(Clone, Debug, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Backend that turns a conversation into reply text
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Return the reply text, or `DialogueUnavailable`
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}

/// OpenAI-compatible `/chat/completions` client
pub struct OpenAiTransport {
    client: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    model: String,
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiTransport {
    pub fn from_config(config: &TutorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| TutorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatTransport for OpenAiTransport {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TutorError::DialogueUnavailable(MISSING_API_KEY.to_string()))?;

        let url = format!("{}/chat/completions", self.api_base);
        let body = CompletionBody {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(model = %self.model, turns = request.messages.len(), "chat completion request");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| TutorError::DialogueUnavailable(format!("request failed: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            let detail = resp.text().await.unwrap_or_default();
            return Err(TutorError::DialogueUnavailable(format!(
                "API returned {}: {}",
                status,
                detail.trim()
            )));
        }

        let parsed: CompletionResponse = resp
            .json()
            .await
            .map_err(|e| TutorError::DialogueUnavailable(format!("malformed response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .ok_or_else(|| TutorError::DialogueUnavailable("response contained no message".to_string()))
    }
}
