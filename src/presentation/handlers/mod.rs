mod chat;
mod conversations;
mod health;
mod tasks;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use chat::{CHAT_FAILURE_MESSAGE, ChatRequest, ChatResponse, chat_handler};
pub use conversations::{
    clear_conversations_handler, delete_conversation_handler, get_conversation_handler,
    list_conversations_handler,
};
pub use health::health_handler;
pub use tasks::{get_task_handler, list_tasks_handler};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned when a handler panics.
#[derive(Serialize)]
pub struct InternalErrorResponse {
    pub timestamp: DateTime<Utc>,
    pub error: &'static str,
    pub message: &'static str,
    pub details: &'static str,
}

impl InternalErrorResponse {
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            error: "internal_server_error",
            message: "An internal server error occurred",
            details: "Please try again later or contact support if the problem persists",
        }
    }
}

impl Default for InternalErrorResponse {
    fn default() -> Self {
        Self::new()
    }
}
