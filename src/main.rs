use std::sync::Arc;

use tokio::net::TcpListener;

use todo_agent::application::ports::{ConversationHistory, TaskStore};
use todo_agent::application::services::{ContextWindow, TodoAgent};
use todo_agent::infrastructure::llm::create_llm_client;
use todo_agent::infrastructure::observability::{TracingConfig, init_tracing};
use todo_agent::infrastructure::persistence::{InMemoryConversationHistory, InMemoryTaskStore};
use todo_agent::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    init_tracing(&TracingConfig::from_settings(
        &settings.logging,
        settings.app.environment,
    ));

    let task_store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
    let conversation_history: Arc<dyn ConversationHistory> =
        Arc::new(InMemoryConversationHistory::new());
    let llm_client = Arc::new(create_llm_client(&settings.llm)?);

    if settings.llm.api_key.is_empty() {
        tracing::warn!("No model API key configured; chat requests will fail upstream");
    }

    let mut agent = TodoAgent::new(
        llm_client,
        Arc::clone(&task_store),
        Arc::clone(&conversation_history),
    )
    .with_context_window(ContextWindow::new(settings.agent.context_window))
    .with_max_tool_rounds(settings.agent.max_tool_rounds);
    if let Some(system_prompt) = settings.agent.system_prompt.clone() {
        agent = agent.with_system_prompt(system_prompt);
    }

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    tracing::info!(
        service = %settings.app.service_name,
        version = %settings.app.version,
        model = %settings.llm.chat_model,
        context_window = agent.context_window().max_messages(),
        "Starting service"
    );

    let state = AppState {
        agent: Arc::new(agent),
        task_store,
        conversation_history,
        settings,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}
