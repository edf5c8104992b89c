use super::{ChatMessage, ConversationKey};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatConversation {
    pub key: ConversationKey,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatConversation {
    pub fn new(key: ConversationKey) -> Self {
        let now = Utc::now();
        Self {
            key,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Appends in arrival order and refreshes `updated_at`.
    pub fn push(&mut self, message: ChatMessage) {
        self.updated_at = message.timestamp.max(self.updated_at);
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
