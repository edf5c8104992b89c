use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::LlmClient;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    InternalErrorResponse, chat_handler, clear_conversations_handler, delete_conversation_handler,
    get_conversation_handler, get_task_handler, health_handler, list_conversations_handler,
    list_tasks_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<L>(state: AppState<L>) -> Router
where
    L: LlmClient + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler::<L>))
        .route("/api/v1/chat", post(chat_handler::<L>))
        .route("/api/v1/tasks", get(list_tasks_handler::<L>))
        .route("/api/v1/tasks/{task_name}", get(get_task_handler::<L>))
        .route(
            "/api/v1/conversations",
            get(list_conversations_handler::<L>).delete(clear_conversations_handler::<L>),
        )
        .route(
            "/api/v1/conversations/{conversation_id}",
            get(get_conversation_handler::<L>).delete(delete_conversation_handler::<L>),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

fn handle_panic(panic: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Unhandled panic in request handler");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(InternalErrorResponse::new()),
    )
        .into_response()
}
