mod settings;

pub use settings::{
    AgentConfig, ComparisonConfig, CredentialError, LLMConfig, LoggingConfig, ScrapeConfig,
    Settings,
};
