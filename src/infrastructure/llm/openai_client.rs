use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{
    Completion, LlmClient, LlmClientError, PromptMessage, ToolCall, ToolDefinition,
};
use crate::presentation::config::{LlmProvider, LlmSettings};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const AZURE_API_VERSION: &str = "2024-06-01";

/// Chat-completions client with function calling, for OpenAI and API-compatible servers.
pub struct OpenAiClient {
    client: Client,
    provider: LlmProvider,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Serialize)]
struct WireToolCall {
    id: String,
    r#type: &'static str,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct WireTool<'a> {
    r#type: &'static str,
    function: WireFunction<'a>,
}

#[derive(Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ResponseToolCall>>,
}

#[derive(Deserialize)]
struct ResponseToolCall {
    id: String,
    function: WireFunctionCall,
}

impl OpenAiClient {
    fn to_wire(message: &PromptMessage) -> WireMessage {
        match message {
            PromptMessage::System(content) => WireMessage {
                role: "system",
                content: Some(content.clone()),
                tool_call_id: None,
                tool_calls: None,
            },
            PromptMessage::User(content) => WireMessage {
                role: "user",
                content: Some(content.clone()),
                tool_call_id: None,
                tool_calls: None,
            },
            PromptMessage::Assistant {
                content,
                tool_calls,
            } => WireMessage {
                role: "assistant",
                content: content.clone(),
                tool_call_id: None,
                tool_calls: (!tool_calls.is_empty()).then(|| {
                    tool_calls
                        .iter()
                        .map(|call| WireToolCall {
                            id: call.id.clone(),
                            r#type: "function",
                            function: WireFunctionCall {
                                name: call.name.clone(),
                                arguments: call.arguments.to_string(),
                            },
                        })
                        .collect()
                }),
            },
            PromptMessage::Tool {
                tool_call_id,
                content,
            } => WireMessage {
                role: "tool",
                content: Some(content.clone()),
                tool_call_id: Some(tool_call_id.clone()),
                tool_calls: None,
            },
        }
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.provider {
            LlmProvider::Azure => request
                .query(&[("api-version", AZURE_API_VERSION)])
                .header("api-key", &self.api_key),
            _ => request.header("Authorization", format!("Bearer {}", self.api_key)),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(
        skip(self, messages, tools),
        fields(model = %self.model, messages = messages.len(), tools = tools.len())
    )]
    async fn complete(
        &self,
        messages: &[PromptMessage],
        tools: &[ToolDefinition],
    ) -> Result<Completion, LlmClientError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: messages.iter().map(Self::to_wire).collect(),
            tools: tools
                .iter()
                .map(|tool| WireTool {
                    r#type: "function",
                    function: WireFunction {
                        name: &tool.name,
                        description: &tool.description,
                        parameters: &tool.parameters,
                    },
                })
                .collect(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let request = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request_body);
        let response = self
            .apply_auth(request)
            .send()
            .await
            .map_err(|e| LlmClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Model provider rate limited the request");
            return Err(LlmClientError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let completion_response: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))?;

        let message = completion_response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| LlmClientError::InvalidResponse("empty choices".to_string()))?;

        let tool_calls = message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(parse_tool_call)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Completion {
            content: message.content,
            tool_calls,
        })
    }
}

fn parse_tool_call(call: ResponseToolCall) -> Result<ToolCall, LlmClientError> {
    let arguments: Value = serde_json::from_str(&call.function.arguments).map_err(|e| {
        tracing::warn!(
            tool = %call.function.name,
            tool_call_id = %call.id,
            error = %e,
            "Model sent malformed tool arguments"
        );
        LlmClientError::InvalidResponse(format!(
            "malformed arguments for {}: {}",
            call.function.name, e
        ))
    })?;

    Ok(ToolCall {
        id: call.id,
        name: call.function.name,
        arguments,
    })
}

pub fn create_llm_client(settings: &LlmSettings) -> Result<OpenAiClient, LlmClientError> {
    let base_url = match settings.provider {
        LlmProvider::OpenAi => settings
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_BASE_URL)
            .trim_end_matches('/')
            .to_string(),
        LlmProvider::LmStudio => settings
            .base_url
            .as_deref()
            .ok_or_else(|| {
                LlmClientError::InvalidConfiguration(
                    "base_url required for lmstudio provider".to_string(),
                )
            })?
            .trim_end_matches('/')
            .to_string(),
        LlmProvider::Azure => {
            let endpoint = settings.azure_endpoint.as_deref().ok_or_else(|| {
                LlmClientError::InvalidConfiguration(
                    "azure_endpoint required for azure provider".to_string(),
                )
            })?;
            format!(
                "{}/openai/deployments/{}",
                endpoint.trim_end_matches('/'),
                settings.chat_model
            )
        }
    };

    Ok(OpenAiClient {
        client: Client::new(),
        provider: settings.provider,
        base_url,
        api_key: settings.api_key.clone(),
        model: settings.chat_model.clone(),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    })
}
