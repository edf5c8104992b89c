use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TaskListResponse {
    pub success: bool,
    pub tasks: Vec<String>,
    pub total_count: usize,
    pub message: String,
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub success: bool,
    pub task_name: String,
    pub message: String,
}

pub async fn list_tasks_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let tasks = state.task_store.list_all().await;
    let message = if tasks.is_empty() {
        "No tasks found"
    } else {
        "Tasks retrieved successfully"
    };

    Json(TaskListResponse {
        success: true,
        total_count: tasks.len(),
        tasks,
        message: message.to_string(),
    })
}

pub async fn get_task_handler<L>(
    State(state): State<AppState<L>>,
    Path(task_name): Path<String>,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    match state.task_store.get(&task_name).await {
        Some(stored) => (
            StatusCode::OK,
            Json(TaskResponse {
                success: true,
                message: format!("Task found: {}", stored),
                task_name: stored,
            }),
        ),
        None => (
            StatusCode::NOT_FOUND,
            Json(TaskResponse {
                success: false,
                task_name: String::new(),
                message: format!("Task '{}' not found", task_name),
            }),
        ),
    }
}
