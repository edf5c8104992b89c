use std::sync::Arc;

use crate::application::ports::{ConversationHistory, LlmClient, TaskStore};
use crate::application::services::TodoAgent;
use crate::presentation::config::Settings;

pub struct AppState<L>
where
    L: LlmClient,
{
    pub agent: Arc<TodoAgent<L>>,
    pub task_store: Arc<dyn TaskStore>,
    pub conversation_history: Arc<dyn ConversationHistory>,
    pub settings: Settings,
}

impl<L> Clone for AppState<L>
where
    L: LlmClient,
{
    fn clone(&self) -> Self {
        Self {
            agent: Arc::clone(&self.agent),
            task_store: Arc::clone(&self.task_store),
            conversation_history: Arc::clone(&self.conversation_history),
            settings: self.settings.clone(),
        }
    }
}
