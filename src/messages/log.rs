use super::types::{ChatMessage, Role};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe, append-only log of the UI-visible conversation.
///
/// Kept separate from the LLM conversation history: the log is what the
/// chat panel shows, including synthetic error entries.
#[derive(Debug, Clone)]
pub struct MessageLog {
    messages: Arc<RwLock<Vec<ChatMessage>>>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self {
            messages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn push(&self, message: ChatMessage) {
        self.messages.write().push(message);
    }

    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.read().clone()
    }

    pub fn last_role(&self) -> Option<Role> {
        self.messages.read().last().map(|m| m.role)
    }

    pub fn clear(&self) {
        self.messages.write().clear();
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

impl Default for MessageLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_snapshot() {
        let log = MessageLog::new();
        log.push(ChatMessage::user("question"));
        log.push(ChatMessage::assistant("answer"));

        let all = log.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].role, Role::User);
        assert_eq!(all[1].role, Role::Assistant);
        assert_eq!(log.last_role(), Some(Role::Assistant));
    }

    #[test]
    fn test_clear() {
        let log = MessageLog::new();
        log.push(ChatMessage::user("question"));
        assert!(!log.is_empty());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.last_role(), None);
    }
}
