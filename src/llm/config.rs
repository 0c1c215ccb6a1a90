//! Configuration for the chat-completions backend

use std::time::Duration;

/// Configuration for the LLM endpoint
#[derive(Clone, Debug)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible server
    pub endpoint: String,

    /// Top-p (nucleus) sampling parameter
    pub top_p: f32,

    /// Maximum tokens to generate per response
    pub max_tokens: usize,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8080".to_string(),
            top_p: 0.9,
            max_tokens: 1024,
            timeout: Duration::from_secs(120),
        }
    }
}

impl LlmConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
