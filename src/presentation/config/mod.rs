mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AgentSettings, AppSettings, LlmProvider, LlmSettings, LoggingSettings, ServerSettings,
    Settings,
};
