use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AzureSettings;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion service returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("completion response had no message content")]
    EmptyResponse,
}

/// A chat-completion backend that answers a (system, user) prompt pair with raw text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Azure OpenAI chat completions, asking for a JSON object reply.
pub struct AzureCompletionClient {
    http: Client,
    settings: AzureSettings,
}

impl AzureCompletionClient {
    pub fn new(settings: AzureSettings) -> Self {
        Self {
            http: Client::new(),
            settings,
        }
    }

    pub fn url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.deployment
        )
    }
}

#[async_trait]
impl CompletionService for AzureCompletionClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let body = ChatRequest {
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
            response_format: ResponseFormat { kind: "json_object" },
        };

        debug!(deployment = %self.settings.deployment, "sending chat completion request");

        let resp = self
            .http
            .post(self.url())
            .query(&[("api-version", self.settings.api_version.as_str())])
            .header("api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            // The body carries the service's reason (quota, auth, content filter).
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }

        let resp: ChatResponse = resp.json().await?;

        resp.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }
}
