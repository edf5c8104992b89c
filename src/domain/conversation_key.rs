use std::fmt;

/// Key used when a caller does not name a conversation.
pub const DEFAULT_CONVERSATION_KEY: &str = "default";

/// Caller-chosen identifier grouping the messages of one chat.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConversationKey(String);

impl ConversationKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_CONVERSATION_KEY
    }
}

impl Default for ConversationKey {
    fn default() -> Self {
        Self(DEFAULT_CONVERSATION_KEY.to_string())
    }
}

impl From<&str> for ConversationKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ConversationKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
