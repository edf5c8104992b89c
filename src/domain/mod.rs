mod conversation;
mod conversation_key;
mod message;
mod message_id;
mod message_role;
mod task_key;

pub use conversation::ChatConversation;
pub use conversation_key::{ConversationKey, DEFAULT_CONVERSATION_KEY};
pub use message::ChatMessage;
pub use message_id::MessageId;
pub use message_role::MessageRole;
pub use task_key::TaskKey;
