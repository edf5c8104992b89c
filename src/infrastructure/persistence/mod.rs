mod in_memory_conversation_history;
mod in_memory_task_store;

pub use in_memory_conversation_history::InMemoryConversationHistory;
pub use in_memory_task_store::InMemoryTaskStore;
