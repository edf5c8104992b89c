use async_trait::async_trait;

use crate::domain::{ChatConversation, ChatMessage, ConversationKey, MessageId, MessageRole};

/// Ledger of chat messages grouped by conversation. Stores everything; windowing is up to the caller.
#[async_trait]
pub trait ConversationHistory: Send + Sync {
    async fn add_message(
        &self,
        key: &ConversationKey,
        content: &str,
        role: MessageRole,
    ) -> MessageId;

    async fn get_conversation(&self, key: &ConversationKey) -> Option<ChatConversation>;

    async fn get_all_conversations(&self) -> Vec<ChatConversation>;

    async fn delete_conversation(&self, key: &ConversationKey) -> bool;

    async fn clear_all(&self) -> usize;

    async fn get_messages(&self, key: &ConversationKey) -> Vec<ChatMessage>;

    async fn exists(&self, key: &ConversationKey) -> bool;
}
