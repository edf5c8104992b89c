use super::{MessageId, MessageRole};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub content: String,
    pub role: MessageRole,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: String) -> Self {
        Self {
            id: MessageId::new(),
            content,
            role,
            timestamp: Utc::now(),
        }
    }
}
