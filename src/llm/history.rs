//! Conversation history for LLM requests
//!
//! Holds the turns actually sent to the endpoint, trimmed to a token
//! budget. Distinct from the UI's `MessageLog`, which also carries
//! synthetic error entries the model should never see.

use crate::messages::{ChatMessage, Role};

/// Rough token estimate: about four characters per token for English text.
fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

/// Conversation history with a token budget.
#[derive(Clone, Debug)]
pub struct History {
    system_prompt: String,
    turns: Vec<ChatMessage>,
    max_tokens: usize,
    current_tokens: usize,
}

impl History {
    pub fn new(system_prompt: impl Into<String>, max_tokens: usize) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            turns: Vec::new(),
            max_tokens,
            current_tokens: 0,
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Replace the system prompt and start the conversation over. A new
    /// persona should not inherit turns written under the old one.
    pub fn reset_with_prompt(&mut self, prompt: impl Into<String>) {
        self.system_prompt = prompt.into();
        self.clear();
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::user(content));
    }

    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.push(ChatMessage::assistant(content));
    }

    fn push(&mut self, message: ChatMessage) {
        self.current_tokens += estimate_tokens(&message.content);
        self.turns.push(message);
        self.trim_to_budget();
    }

    /// Drop the oldest turns until the estimate fits the budget, reserving
    /// room for the system prompt.
    fn trim_to_budget(&mut self) {
        let budget = self
            .max_tokens
            .saturating_sub(estimate_tokens(&self.system_prompt));

        while self.current_tokens > budget && self.turns.len() > 1 {
            let removed = self.turns.remove(0);
            self.current_tokens = self
                .current_tokens
                .saturating_sub(estimate_tokens(&removed.content));
        }
    }

    /// Messages for the next request: system prompt first, then the turns.
    pub fn request_messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend(self.turns.iter().cloned());
        messages
    }

    pub fn clear(&mut self) {
        self.turns.clear();
        self.current_tokens = 0;
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_messages_order() {
        let mut history = History::new("be brief", 4096);
        history.add_user("hello");
        history.add_assistant("hi");

        let messages = history.request_messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new("be brief", 4096);
        history.add_user("hello");
        history.clear();

        assert!(history.is_empty());
        assert_eq!(history.request_messages().len(), 1);
    }

    #[test]
    fn test_trimming_drops_oldest() {
        // Budget of ~40 tokens, each turn ~25 tokens
        let mut history = History::new("", 40);
        history.add_user("a".repeat(100));
        history.add_assistant("b".repeat(100));
        history.add_user("c".repeat(100));

        // Oldest turns were dropped; the newest survives
        assert!(history.len() < 3);
        let last = history.request_messages().pop().unwrap();
        assert!(last.content.starts_with('c'));
    }

    #[test]
    fn test_reset_with_prompt_clears_turns() {
        let mut history = History::new("old", 4096);
        history.add_user("hello");

        history.reset_with_prompt("new");
        assert!(history.is_empty());
        assert_eq!(history.system_prompt(), "new");
    }
}
