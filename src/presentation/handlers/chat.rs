use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::LlmClient;
use crate::domain::ConversationKey;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::ErrorResponse;

pub const CHAT_FAILURE_MESSAGE: &str =
    "I'm sorry, I encountered an error processing your request. Please try again.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub conversation_id: Option<String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[tracing::instrument(skip(state, request), fields(conversation_id = tracing::field::Empty))]
pub async fn chat_handler<L>(
    State(state): State<AppState<L>>,
    Json(request): Json<ChatRequest>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    if request.message.is_empty() {
        tracing::warn!("Chat request with empty message");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "message must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let conversation_id = request
        .conversation_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    tracing::Span::current().record("conversation_id", conversation_id.as_str());

    if state.settings.agent.enable_conversation_logging {
        tracing::info!(message = %sanitize_prompt(&request.message), "Processing chat request");
    }

    match state
        .agent
        .process_message(
            &request.message,
            Some(ConversationKey::new(conversation_id.clone())),
        )
        .await
    {
        Ok(reply) => {
            if state.settings.agent.enable_conversation_logging {
                tracing::info!(reply = %sanitize_prompt(&reply.content), "Chat reply ready");
            }
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: reply.content,
                    conversation_id: Some(reply.conversation_key.to_string()),
                    success: true,
                    error: None,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Chat request failed");
            (
                StatusCode::OK,
                Json(ChatResponse {
                    response: CHAT_FAILURE_MESSAGE.to_string(),
                    conversation_id: Some(conversation_id),
                    success: false,
                    error: Some(e.to_string()),
                }),
            )
                .into_response()
        }
    }
}
