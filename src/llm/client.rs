//! HTTP client for an OpenAI-compatible chat-completions endpoint
//!
//! The language model is an external service; this client is the only
//! thing in the crate that knows it speaks HTTP. The `ChatBackend` trait
//! is the seam the session worker talks through, so the orchestration can
//! be exercised with stub backends in tests.

use crate::llm::config::LlmConfig;
use crate::messages::ChatMessage;
use crate::{ParleyError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A backend that can turn a conversation into a complete reply.
pub trait ChatBackend: Send {
    /// Request a full (non-streamed) completion.
    fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f32,
    top_p: f32,
    max_tokens: usize,
    stream: bool,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
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

/// reqwest-based `ChatBackend`.
///
/// Owns a tokio runtime so the session worker thread can call it without
/// an async context of its own.
pub struct HttpChatClient {
    config: LlmConfig,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl HttpChatClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ParleyError::ConfigError(format!("Failed to build HTTP client: {e}")))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ParleyError::ConfigError(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            config,
            client,
            runtime,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

impl ChatBackend for HttpChatClient {
    fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: f32,
    ) -> Result<String> {
        let body = ChatCompletionRequest {
            model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature,
            top_p: self.config.top_p,
            max_tokens: self.config.max_tokens,
            stream: false,
        };

        let url = self.completions_url();
        debug!("Requesting completion from {} with model {}", url, model);

        self.runtime.block_on(async {
            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| ParleyError::LlmError(format!("Request failed: {e}")))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ParleyError::LlmError(format!(
                    "Server returned {status}"
                )));
            }

            let parsed: ChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| ParleyError::LlmError(format!("Malformed response: {e}")))?;

            let content = parsed
                .choices
                .first()
                .and_then(|c| c.message.content.clone())
                .unwrap_or_default();

            if content.trim().is_empty() {
                return Err(ParleyError::LlmError(
                    "Empty completion from server".to_string(),
                ));
            }

            Ok(content)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::ChatMessage;

    #[test]
    fn test_completions_url_strips_trailing_slash() {
        let client =
            HttpChatClient::new(LlmConfig::default().with_endpoint("http://localhost:8080/"))
                .unwrap();
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_serialization() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hello"),
        ];
        let body = ChatCompletionRequest {
            model: "test-model",
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 64,
            stream: false,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hello");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_response_deserialization() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":"Hi there."}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("Hi there.")
        );
    }
}
