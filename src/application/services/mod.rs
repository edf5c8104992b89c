mod context_window;
mod task_tools;
mod todo_agent;

pub use context_window::{ContextWindow, DEFAULT_CONTEXT_WINDOW};
pub use task_tools::{
    CHECK_TASK_EXISTS_TOOL, CREATE_TASK_TOOL, DELETE_TASK_TOOL, GET_ALL_TASKS_TOOL,
    GET_TASK_COUNT_TOOL, GET_TASK_TOOL, TaskTools, UPDATE_TASK_TOOL,
};
pub use todo_agent::{
    AgentError, AgentReply, DEFAULT_MAX_TOOL_ROUNDS, DEFAULT_SYSTEM_PROMPT, NO_RESPONSE_MESSAGE,
    TodoAgent,
};
