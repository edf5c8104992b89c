use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::LlmClient;
use crate::domain::{ChatConversation, ChatMessage, ConversationKey};
use crate::presentation::state::AppState;

use super::ErrorResponse;

#[derive(Serialize)]
pub struct ConversationSummary {
    pub conversation_id: String,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub messages: Vec<MessageResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub content: String,
    pub role: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct ClearConversationsResponse {
    pub cleared: usize,
}

impl From<&ChatConversation> for ConversationSummary {
    fn from(conversation: &ChatConversation) -> Self {
        Self {
            conversation_id: conversation.key.to_string(),
            message_count: conversation.len(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

impl From<ChatMessage> for MessageResponse {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.as_uuid(),
            content: message.content,
            role: message.role.to_string(),
            timestamp: message.timestamp,
        }
    }
}

impl From<ChatConversation> for ConversationResponse {
    fn from(conversation: ChatConversation) -> Self {
        Self {
            conversation_id: conversation.key.to_string(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
            messages: conversation
                .messages
                .into_iter()
                .map(MessageResponse::from)
                .collect(),
        }
    }
}

pub async fn list_conversations_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let mut summaries: Vec<ConversationSummary> = state
        .conversation_history
        .get_all_conversations()
        .await
        .iter()
        .map(ConversationSummary::from)
        .collect();
    summaries.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    Json(summaries)
}

pub async fn get_conversation_handler<L>(
    State(state): State<AppState<L>>,
    Path(conversation_id): Path<String>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let key = ConversationKey::new(conversation_id);
    match state.conversation_history.get_conversation(&key).await {
        Some(conversation) => (
            StatusCode::OK,
            Json(ConversationResponse::from(conversation)),
        )
            .into_response(),
        None => not_found(&key).into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_conversation_handler<L>(
    State(state): State<AppState<L>>,
    Path(conversation_id): Path<String>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let key = ConversationKey::new(conversation_id);
    if state.conversation_history.delete_conversation(&key).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        not_found(&key).into_response()
    }
}

#[tracing::instrument(skip(state))]
pub async fn clear_conversations_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let cleared = state.conversation_history.clear_all().await;
    Json(ClearConversationsResponse { cleared })
}

fn not_found(key: &ConversationKey) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Conversation '{}' not found", key),
        }),
    )
}
