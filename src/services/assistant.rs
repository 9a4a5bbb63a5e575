use crate::models::{ChatMessage, ChatRole};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Assistant returned empty content")]
    EmptyContent,

    #[error("Assistant API key is not configured")]
    NotConfigured,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: ChatRole,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
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

/// Settings the assistant client is built from
#[derive(Debug, Clone)]
pub struct AssistantOptions {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub fallback_reply: String,
    pub timeout: Duration,
}

/// Stateless chat-completion client
///
/// Every call carries the whole conversation; nothing is remembered between
/// calls.
pub struct AssistantClient {
    client: Client,
    options: AssistantOptions,
}

impl AssistantClient {
    pub fn new(options: AssistantOptions) -> Result<Self, AssistantError> {
        let client = Client::builder().timeout(options.timeout).build()?;

        Ok(Self { client, options })
    }

    pub fn fallback_reply(&self) -> &str {
        &self.options.fallback_reply
    }

    /// Ask the model for the next reply
    ///
    /// The system prompt defaults to the configured one when `system_prompt`
    /// is `None` or blank.
    pub async fn complete(
        &self,
        system_prompt: Option<&str>,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, AssistantError> {
        if self.options.api_key.is_empty() {
            return Err(AssistantError::NotConfigured);
        }

        let system = system_prompt
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.options.system_prompt);

        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(WireMessage {
            role: ChatRole::System,
            content: system,
        });
        messages.extend(history.iter().map(|m| WireMessage {
            role: m.role,
            content: &m.content,
        }));
        messages.push(WireMessage {
            role: ChatRole::User,
            content: message,
        });

        let request = CompletionRequest {
            model: &self.options.model,
            messages,
        };

        debug!(
            "Sending {} messages to assistant model {}",
            request.messages.len(),
            self.options.model
        );

        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.options.endpoint.trim_end_matches('/')
            ))
            .bearer_auth(&self.options.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read body".to_string());
            return Err(AssistantError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: CompletionResponse = response.json().await?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(AssistantError::EmptyContent)
    }

    /// Like [`complete`](Self::complete), but any failure yields the fallback reply
    pub async fn reply(
        &self,
        system_prompt: Option<&str>,
        history: &[ChatMessage],
        message: &str,
    ) -> String {
        match self.complete(system_prompt, history, message).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Assistant unavailable, using fallback reply: {}", e);
                self.options.fallback_reply.clone()
            }
        }
    }
}
