use std::sync::Arc;

use crate::application::ports::{
    Completion, ConversationHistory, LlmClient, LlmClientError, PromptMessage, TaskStore,
};
use crate::domain::{ChatMessage, ConversationKey, MessageRole};

use super::context_window::ContextWindow;
use super::task_tools::TaskTools;

pub const NO_RESPONSE_MESSAGE: &str = "No response generated";
pub const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You manage the user's to-do list through the tools you are given. Use the conversation history to \
resolve partial references: after \"buy milk\", the message \"also eggs\" means the task \"buy eggs\".

- Create one task per item when the user lists several.
- Before renaming or deleting, list the tasks and pick the one the user means.
- When greeted, say how many tasks are on the list and offer to add more.

Reply in one or two short sentences, for example \"Task 'buy milk' added\" or \"Task 'buy milk' already \
exists\". When listing, show only task names. If a request is ambiguous, ask one short question.";

#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub conversation_key: ConversationKey,
    pub content: String,
}

/// Runs one chat turn: records the user message, replays recent history to the model,
/// executes any task tools it asks for, and records the final reply.
pub struct TodoAgent<L>
where
    L: LlmClient,
{
    llm_client: Arc<L>,
    task_tools: TaskTools,
    history: Arc<dyn ConversationHistory>,
    context_window: ContextWindow,
    system_prompt: String,
    max_tool_rounds: usize,
}

impl<L> TodoAgent<L>
where
    L: LlmClient,
{
    pub fn new(
        llm_client: Arc<L>,
        task_store: Arc<dyn TaskStore>,
        history: Arc<dyn ConversationHistory>,
    ) -> Self {
        Self {
            llm_client,
            task_tools: TaskTools::new(task_store),
            history,
            context_window: ContextWindow::default(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_context_window(mut self, context_window: ContextWindow) -> Self {
        self.context_window = context_window;
        self
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = system_prompt.into();
        self
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds.max(1);
        self
    }

    pub fn context_window(&self) -> ContextWindow {
        self.context_window
    }

    #[tracing::instrument(
        skip(self, message, conversation_key),
        fields(conversation_id = tracing::field::Empty)
    )]
    pub async fn process_message(
        &self,
        message: &str,
        conversation_key: Option<ConversationKey>,
    ) -> Result<AgentReply, AgentError> {
        let conversation_key = conversation_key.unwrap_or_default();
        tracing::Span::current().record(
            "conversation_id",
            tracing::field::display(&conversation_key),
        );

        self.history
            .add_message(&conversation_key, message, MessageRole::User)
            .await;

        let messages = self.history.get_messages(&conversation_key).await;
        let window = self.context_window.select(&messages);
        let window_len = window.len();
        let mut prompt = self.build_prompt(window);

        let content = match self.run_tool_loop(&mut prompt).await {
            Ok(content) => content,
            Err(e) => {
                tracing::error!(error = %e, "Agent turn failed");
                return Err(e);
            }
        };

        self.history
            .add_message(&conversation_key, &content, MessageRole::Assistant)
            .await;
        tracing::info!(window_len, "Agent turn completed");

        Ok(AgentReply {
            conversation_key,
            content,
        })
    }

    fn build_prompt(&self, window: &[ChatMessage]) -> Vec<PromptMessage> {
        let mut prompt = Vec::with_capacity(window.len() + 1);
        prompt.push(PromptMessage::System(self.system_prompt.clone()));
        prompt.extend(window.iter().map(|message| match message.role {
            MessageRole::User => PromptMessage::User(message.content.clone()),
            MessageRole::Assistant => PromptMessage::assistant_text(message.content.clone()),
        }));
        prompt
    }

    async fn run_tool_loop(&self, prompt: &mut Vec<PromptMessage>) -> Result<String, AgentError> {
        let tools = self.task_tools.definitions();

        for round in 0..self.max_tool_rounds {
            let Completion {
                content,
                tool_calls,
            } = self.llm_client.complete(prompt, &tools).await?;

            if tool_calls.is_empty() {
                return Ok(content
                    .filter(|text| !text.trim().is_empty())
                    .unwrap_or_else(|| NO_RESPONSE_MESSAGE.to_string()));
            }

            tracing::debug!(round, tool_calls = tool_calls.len(), "Model requested tools");

            let mut results = Vec::with_capacity(tool_calls.len());
            for call in &tool_calls {
                results.push(PromptMessage::Tool {
                    tool_call_id: call.id.clone(),
                    content: self.task_tools.execute(call).await,
                });
            }

            prompt.push(PromptMessage::Assistant {
                content,
                tool_calls,
            });
            prompt.extend(results);
        }

        Err(AgentError::ToolRoundsExceeded(self.max_tool_rounds))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("completion: {0}")]
    Completion(#[from] LlmClientError),
    #[error("model kept calling tools after {0} rounds")]
    ToolRoundsExceeded(usize),
}
