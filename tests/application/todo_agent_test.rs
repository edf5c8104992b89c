use std::sync::Arc;

use serde_json::json;

use todo_agent::application::ports::{
    Completion, ConversationHistory, LlmClientError, PromptMessage, TaskStore,
};
use todo_agent::application::services::{
    AgentError, CREATE_TASK_TOOL, ContextWindow, DEFAULT_SYSTEM_PROMPT, GET_ALL_TASKS_TOOL,
    NO_RESPONSE_MESSAGE, TodoAgent,
};
use todo_agent::domain::{ConversationKey, MessageRole};
use todo_agent::infrastructure::persistence::{InMemoryConversationHistory, InMemoryTaskStore};

use crate::helpers::{ScriptedLlmClient, tool_call, tool_turn};

struct Fixture {
    llm_client: Arc<ScriptedLlmClient>,
    task_store: Arc<dyn TaskStore>,
    history: Arc<dyn ConversationHistory>,
}

impl Fixture {
    fn new(llm_client: ScriptedLlmClient) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            task_store: Arc::new(InMemoryTaskStore::new()),
            history: Arc::new(InMemoryConversationHistory::new()),
        }
    }

    fn agent(&self) -> TodoAgent<ScriptedLlmClient> {
        TodoAgent::new(
            Arc::clone(&self.llm_client),
            Arc::clone(&self.task_store),
            Arc::clone(&self.history),
        )
    }
}

#[tokio::test]
async fn given_plain_reply_when_processing_then_records_both_turns() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![Completion::text(
        "Hello! You have 0 tasks.",
    )]));
    let key = ConversationKey::new("c1");

    let reply = fixture
        .agent()
        .process_message("hi", Some(key.clone()))
        .await
        .unwrap();

    assert_eq!(reply.content, "Hello! You have 0 tasks.");
    assert_eq!(reply.conversation_key, key);
    let messages = fixture.history.get_messages(&key).await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].content, "hi");
    assert_eq!(messages[1].role, MessageRole::Assistant);
}

#[tokio::test]
async fn given_no_key_when_processing_then_uses_default_conversation() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![Completion::text("ok")]));

    let reply = fixture.agent().process_message("hi", None).await.unwrap();

    assert!(reply.conversation_key.is_default());
    assert!(fixture.history.exists(&ConversationKey::default()).await);
}

#[tokio::test]
async fn given_prompt_when_calling_model_then_starts_with_system_prompt_and_current_message() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![Completion::text("ok")]));

    fixture
        .agent()
        .process_message("add buy milk", None)
        .await
        .unwrap();

    let requests = fixture.llm_client.requests();
    assert_eq!(
        requests[0],
        vec![
            PromptMessage::System(DEFAULT_SYSTEM_PROMPT.to_string()),
            PromptMessage::User("add buy milk".to_string()),
        ]
    );
}

#[tokio::test]
async fn given_tool_call_when_processing_then_executes_tool_and_feeds_result_back() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![
        tool_turn(vec![tool_call(
            "call_1",
            CREATE_TASK_TOOL,
            json!({ "task_name": "buy milk" }),
        )]),
        Completion::text("Task 'buy milk' added"),
    ]));

    let reply = fixture
        .agent()
        .process_message("add buy milk", None)
        .await
        .unwrap();

    assert_eq!(reply.content, "Task 'buy milk' added");
    assert_eq!(fixture.task_store.list_all().await, vec!["buy milk".to_string()]);

    let requests = fixture.llm_client.requests();
    assert_eq!(requests.len(), 2);
    let second = &requests[1];
    assert!(matches!(
        &second[second.len() - 2],
        PromptMessage::Assistant { tool_calls, .. } if tool_calls.len() == 1
    ));
    assert_eq!(
        second[second.len() - 1],
        PromptMessage::Tool {
            tool_call_id: "call_1".to_string(),
            content: "Task 'buy milk' added".to_string(),
        }
    );
}

#[tokio::test]
async fn given_several_items_when_model_calls_tools_in_one_turn_then_creates_each() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![
        tool_turn(vec![
            tool_call("a", CREATE_TASK_TOOL, json!({ "task_name": "buy milk" })),
            tool_call("b", CREATE_TASK_TOOL, json!({ "task_name": "buy eggs" })),
            tool_call("c", CREATE_TASK_TOOL, json!({ "task_name": "BUY MILK" })),
        ]),
        Completion::text("Added buy milk and buy eggs"),
    ]));

    fixture
        .agent()
        .process_message("buy milk, eggs and milk", None)
        .await
        .unwrap();

    assert_eq!(
        fixture.task_store.list_all().await,
        vec!["buy milk".to_string(), "buy eggs".to_string()]
    );
    let requests = fixture.llm_client.requests();
    assert!(requests[1].contains(&PromptMessage::Tool {
        tool_call_id: "c".to_string(),
        content: "Task 'BUY MILK' already exists".to_string(),
    }));
}

#[tokio::test]
async fn given_tool_results_when_turn_completes_then_history_holds_only_user_and_assistant() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![
        tool_turn(vec![tool_call("1", GET_ALL_TASKS_TOOL, json!({}))]),
        Completion::text("No tasks yet"),
    ]));
    let key = ConversationKey::new("c1");

    fixture
        .agent()
        .process_message("what's on my list?", Some(key.clone()))
        .await
        .unwrap();

    let contents: Vec<String> = fixture
        .history
        .get_messages(&key)
        .await
        .into_iter()
        .map(|m| m.content)
        .collect();
    assert_eq!(contents, vec!["what's on my list?", "No tasks yet"]);
}

#[tokio::test]
async fn given_long_history_when_processing_then_sends_only_window_plus_system_prompt() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![]));
    let key = ConversationKey::new("c1");
    for i in 0..6 {
        fixture
            .history
            .add_message(&key, &format!("old {}", i), MessageRole::User)
            .await;
    }

    let agent = fixture
        .agent()
        .with_context_window(ContextWindow::new(3))
        .with_system_prompt("be brief");
    agent.process_message("latest", Some(key)).await.unwrap();

    let requests = fixture.llm_client.requests();
    assert_eq!(
        requests[0],
        vec![
            PromptMessage::System("be brief".to_string()),
            PromptMessage::User("old 4".to_string()),
            PromptMessage::User("old 5".to_string()),
            PromptMessage::User("latest".to_string()),
        ]
    );
}

#[tokio::test]
async fn given_prior_turns_when_processing_then_replays_assistant_messages() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![
        Completion::text("Task 'buy milk' added"),
        Completion::text("Task 'buy eggs' added"),
    ]));
    let agent = fixture.agent();
    let key = ConversationKey::new("c1");

    agent
        .process_message("buy milk", Some(key.clone()))
        .await
        .unwrap();
    agent
        .process_message("also eggs", Some(key.clone()))
        .await
        .unwrap();

    let requests = fixture.llm_client.requests();
    assert_eq!(
        requests[1][1..],
        [
            PromptMessage::User("buy milk".to_string()),
            PromptMessage::assistant_text("Task 'buy milk' added"),
            PromptMessage::User("also eggs".to_string()),
        ]
    );
}

#[tokio::test]
async fn given_empty_model_text_when_processing_then_uses_fallback_reply() {
    let fixture = Fixture::new(ScriptedLlmClient::new(vec![Completion::default()]));

    let reply = fixture.agent().process_message("hi", None).await.unwrap();

    assert_eq!(reply.content, NO_RESPONSE_MESSAGE);
}

#[tokio::test]
async fn given_model_failure_when_processing_then_returns_error_and_keeps_only_user_message() {
    let fixture = Fixture::new(ScriptedLlmClient::failing(LlmClientError::RateLimited));
    let key = ConversationKey::new("c1");

    let result = fixture
        .agent()
        .process_message("hi", Some(key.clone()))
        .await;

    assert!(matches!(
        result,
        Err(AgentError::Completion(LlmClientError::RateLimited))
    ));
    let messages = fixture.history.get_messages(&key).await;
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].role, MessageRole::User);
}

#[tokio::test]
async fn given_model_that_never_stops_calling_tools_when_processing_then_gives_up() {
    let looping_turns = (0..3)
        .map(|i| tool_turn(vec![tool_call(&i.to_string(), GET_ALL_TASKS_TOOL, json!({}))]))
        .collect();
    let fixture = Fixture::new(ScriptedLlmClient::new(looping_turns));

    let result = fixture
        .agent()
        .with_max_tool_rounds(2)
        .process_message("hi", None)
        .await;

    assert!(matches!(result, Err(AgentError::ToolRoundsExceeded(2))));
    assert_eq!(fixture.llm_client.requests().len(), 2);
}
