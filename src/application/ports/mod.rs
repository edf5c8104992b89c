mod conversation_history;
mod llm_client;
mod task_store;

pub use conversation_history::ConversationHistory;
pub use llm_client::{
    Completion, LlmClient, LlmClientError, PromptMessage, ToolCall, ToolDefinition,
};
pub use task_store::{DuplicateTaskError, TaskStore};
