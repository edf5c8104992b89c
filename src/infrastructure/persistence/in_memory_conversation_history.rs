use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::ConversationHistory;
use crate::domain::{ChatConversation, ChatMessage, ConversationKey, MessageId, MessageRole};

/// Conversations keyed by caller-supplied key. Callers only ever receive clones.
#[derive(Default)]
pub struct InMemoryConversationHistory {
    conversations: RwLock<HashMap<ConversationKey, ChatConversation>>,
}

impl InMemoryConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConversationHistory for InMemoryConversationHistory {
    #[tracing::instrument(
        skip(self, key, content, role),
        fields(conversation_id = %key, role = %role)
    )]
    async fn add_message(
        &self,
        key: &ConversationKey,
        content: &str,
        role: MessageRole,
    ) -> MessageId {
        let message = ChatMessage::new(role, content.to_string());
        let message_id = message.id;

        let mut conversations = self.conversations.write().await;
        conversations
            .entry(key.clone())
            .or_insert_with(|| ChatConversation::new(key.clone()))
            .push(message);

        tracing::debug!(message_id = %message_id, "Added message to conversation");
        message_id
    }

    async fn get_conversation(&self, key: &ConversationKey) -> Option<ChatConversation> {
        self.conversations.read().await.get(key).cloned()
    }

    async fn get_all_conversations(&self) -> Vec<ChatConversation> {
        self.conversations.read().await.values().cloned().collect()
    }

    #[tracing::instrument(skip(self, key), fields(conversation_id = %key))]
    async fn delete_conversation(&self, key: &ConversationKey) -> bool {
        let removed = self.conversations.write().await.remove(key).is_some();
        if removed {
            tracing::info!("Deleted conversation");
        }
        removed
    }

    async fn clear_all(&self) -> usize {
        let mut conversations = self.conversations.write().await;
        let count = conversations.len();
        conversations.clear();
        tracing::info!(count, "Cleared conversations");
        count
    }

    async fn get_messages(&self, key: &ConversationKey) -> Vec<ChatMessage> {
        self.conversations
            .read()
            .await
            .get(key)
            .map(|conversation| conversation.messages.clone())
            .unwrap_or_default()
    }

    async fn exists(&self, key: &ConversationKey) -> bool {
        self.conversations.read().await.contains_key(key)
    }
}
