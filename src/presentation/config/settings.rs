use std::path::Path;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;
use crate::application::services::{DEFAULT_CONTEXT_WINDOW, DEFAULT_MAX_TOOL_ROUNDS};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub agent: AgentSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub service_name: String,
    pub version: String,
    pub environment: Environment,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[serde(rename = "openai")]
    OpenAi,
    #[serde(rename = "lmstudio")]
    LmStudio,
    Azure,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSettings {
    pub context_window: usize,
    pub max_tool_rounds: usize,
    pub system_prompt: Option<String>,
    pub enable_conversation_logging: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    /// Loads `.env`, then defaults, `appsettings.<env>.toml` and `APP_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env().map_err(ConfigError::Message)?;
        let mut settings = Self::load_from(environment, Path::new("."))?;

        if settings.llm.api_key.is_empty() {
            settings.llm.api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        }

        Ok(settings)
    }

    pub fn load_from(environment: Environment, config_dir: &Path) -> Result<Self, ConfigError> {
        let settings_file = config_dir.join(format!("appsettings.{}", environment.as_str()));

        Config::builder()
            .set_default("app.service_name", "to-do-agent")?
            .set_default("app.version", env!("CARGO_PKG_VERSION"))?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8086)?
            .set_default("llm.provider", "openai")?
            .set_default("llm.api_key", "")?
            .set_default("llm.chat_model", "gpt-4o-2024-08-06")?
            .set_default("llm.max_tokens", 1024)?
            .set_default("llm.temperature", 0.0)?
            .set_default("agent.context_window", DEFAULT_CONTEXT_WINDOW as i64)?
            .set_default("agent.max_tool_rounds", DEFAULT_MAX_TOOL_ROUNDS as i64)?
            .set_default("agent.enable_conversation_logging", true)?
            .set_default("logging.level", "info")?
            .set_default("logging.enable_json", false)?
            .add_source(File::with_name(&settings_file.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("app.environment", environment.as_str())?
            .build()?
            .try_deserialize()
    }
}
