use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::application::ports::{TaskStore, ToolCall, ToolDefinition};

pub const CREATE_TASK_TOOL: &str = "create_task_tool";
pub const GET_TASK_TOOL: &str = "get_task_tool";
pub const GET_ALL_TASKS_TOOL: &str = "get_all_tasks_tool";
pub const UPDATE_TASK_TOOL: &str = "update_task_tool";
pub const DELETE_TASK_TOOL: &str = "delete_task_tool";
pub const CHECK_TASK_EXISTS_TOOL: &str = "check_task_exists_tool";
pub const GET_TASK_COUNT_TOOL: &str = "get_task_count_tool";

#[derive(Deserialize)]
struct TaskNameArgs {
    task_name: String,
}

#[derive(Deserialize)]
struct RenameArgs {
    old_name: String,
    new_name: String,
}

/// Exposes a [`TaskStore`] to the model as callable tools.
///
/// Every outcome is rendered as plain text so the model can relay it verbatim.
pub struct TaskTools {
    task_store: Arc<dyn TaskStore>,
}

impl TaskTools {
    pub fn new(task_store: Arc<dyn TaskStore>) -> Self {
        Self { task_store }
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let task_name_schema = json!({
            "type": "object",
            "properties": {
                "task_name": { "type": "string", "description": "Name of the task" }
            },
            "required": ["task_name"]
        });
        let no_args_schema = json!({ "type": "object", "properties": {} });

        vec![
            definition(
                CREATE_TASK_TOOL,
                "Create a new task with the given name.",
                task_name_schema.clone(),
            ),
            definition(
                GET_TASK_TOOL,
                "Look up a task by name, ignoring case.",
                task_name_schema.clone(),
            ),
            definition(
                GET_ALL_TASKS_TOOL,
                "List every task.",
                no_args_schema.clone(),
            ),
            definition(
                UPDATE_TASK_TOOL,
                "Rename an existing task.",
                json!({
                    "type": "object",
                    "properties": {
                        "old_name": { "type": "string", "description": "Current task name" },
                        "new_name": { "type": "string", "description": "New task name" }
                    },
                    "required": ["old_name", "new_name"]
                }),
            ),
            definition(
                DELETE_TASK_TOOL,
                "Delete a task by name.",
                task_name_schema.clone(),
            ),
            definition(
                CHECK_TASK_EXISTS_TOOL,
                "Check whether a task exists.",
                task_name_schema,
            ),
            definition(
                GET_TASK_COUNT_TOOL,
                "Count the tasks.",
                no_args_schema,
            ),
        ]
    }

    #[tracing::instrument(skip(self, call), fields(tool = %call.name, tool_call_id = %call.id))]
    pub async fn execute(&self, call: &ToolCall) -> String {
        let output = match call.name.as_str() {
            CREATE_TASK_TOOL => match parse_args::<TaskNameArgs>(call) {
                Ok(args) => self.create_task(&args.task_name).await,
                Err(message) => message,
            },
            GET_TASK_TOOL => match parse_args::<TaskNameArgs>(call) {
                Ok(args) => self.get_task(&args.task_name).await,
                Err(message) => message,
            },
            GET_ALL_TASKS_TOOL => self.get_all_tasks().await,
            UPDATE_TASK_TOOL => match parse_args::<RenameArgs>(call) {
                Ok(args) => self.update_task(&args.old_name, &args.new_name).await,
                Err(message) => message,
            },
            DELETE_TASK_TOOL => match parse_args::<TaskNameArgs>(call) {
                Ok(args) => self.delete_task(&args.task_name).await,
                Err(message) => message,
            },
            CHECK_TASK_EXISTS_TOOL => match parse_args::<TaskNameArgs>(call) {
                Ok(args) => self.check_task_exists(&args.task_name).await,
                Err(message) => message,
            },
            GET_TASK_COUNT_TOOL => self.task_store.list_all().await.len().to_string(),
            other => {
                tracing::warn!(tool = other, "Model requested an unknown tool");
                format!("Unknown tool: {}", other)
            }
        };

        tracing::debug!(output = %output, "Tool call finished");
        output
    }

    async fn create_task(&self, task_name: &str) -> String {
        match self.task_store.create(task_name).await {
            Ok(created) => format!("Task '{}' added", created),
            Err(e) => e.to_string(),
        }
    }

    async fn get_task(&self, task_name: &str) -> String {
        match self.task_store.get(task_name).await {
            Some(stored) => format!("Task found: {}", stored),
            None => format!("Task '{}' not found", task_name),
        }
    }

    async fn get_all_tasks(&self) -> String {
        let tasks = self.task_store.list_all().await;
        if tasks.is_empty() {
            return "No tasks found".to_string();
        }
        format!("Tasks: {}", tasks.join(", "))
    }

    async fn update_task(&self, old_name: &str, new_name: &str) -> String {
        match self.task_store.rename(old_name, new_name).await {
            Ok(Some(_)) => format!("Task '{}' updated to '{}'", old_name, new_name),
            Ok(None) => format!("Task '{}' not found", old_name),
            Err(e) => e.to_string(),
        }
    }

    async fn delete_task(&self, task_name: &str) -> String {
        if self.task_store.delete(task_name).await {
            format!("Task '{}' deleted", task_name)
        } else {
            format!("Task '{}' not found", task_name)
        }
    }

    async fn check_task_exists(&self, task_name: &str) -> String {
        if self.task_store.exists(task_name).await {
            format!("Task '{}' exists", task_name)
        } else {
            format!("Task '{}' does not exist", task_name)
        }
    }
}

fn definition(name: &str, description: &str, parameters: serde_json::Value) -> ToolDefinition {
    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        parameters,
    }
}

fn parse_args<T: DeserializeOwned>(call: &ToolCall) -> Result<T, String> {
    serde_json::from_value(call.arguments.clone())
        .map_err(|e| format!("Invalid arguments for {}: {}", call.name, e))
}
