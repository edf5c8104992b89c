use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::ports::LlmClient;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service_name: String,
    pub version: String,
    pub environment: String,
    pub timestamp: DateTime<Utc>,
}

pub async fn health_handler<L>(State(state): State<AppState<L>>) -> impl IntoResponse
where
    L: LlmClient + 'static,
{
    let app = &state.settings.app;
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service_name: app.service_name.clone(),
            version: app.version.clone(),
            environment: app.environment.to_string(),
            timestamp: Utc::now(),
        }),
    )
}
