use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub llm: LLMConfig,
    pub agent: AgentConfig,
    pub scrape: ScrapeConfig,
    pub comparison: ComparisonConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    pub api_key_file: String,
    /// Ask the service to enforce the expansion schema via `response_format`
    pub structured_output: bool,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
            max_tokens: None,
            api_key_file: "OpenAIKey.txt".to_string(),
            structured_output: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_iterations: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_iterations: 15 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("tool-compare/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Inputs for a comparison run. The defaults are the stock example.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    pub task: String,
    pub framework: String,
    pub objects: Vec<String>,
    pub parameters: Vec<String>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            task: "Web Scraping".to_string(),
            framework: "Python".to_string(),
            objects: vec!["Scrapy".to_string(), "Beautiful Soup".to_string()],
            parameters: vec!["Speed".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("failed to read API key file '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("API key file '{0}' is empty")]
    Empty(String),

    #[error("no API key file at '{0}' and OPENAI_API_KEY is not set")]
    Missing(String),
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_env = env::var("CONFIG_ENV").unwrap_or_else(|_| "default".to_string());

        let config = Config::builder()
            .add_source(File::with_name(&format!("config/{}", config_env)).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("comparison.objects")
                    .with_list_parse_key("comparison.parameters")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load the API key once: first line of the key file, or `OPENAI_API_KEY`
    /// when the file does not exist.
    pub fn api_key(&self) -> Result<String, CredentialError> {
        let path = &self.llm.api_key_file;

        if Path::new(path).exists() {
            let contents = fs::read_to_string(path).map_err(|source| CredentialError::Unreadable {
                path: path.clone(),
                source,
            })?;
            let key = contents.lines().next().unwrap_or_default().trim();
            if key.is_empty() {
                return Err(CredentialError::Empty(path.clone()));
            }
            tracing::debug!("Loaded API key from {}", path);
            return Ok(key.to_string());
        }

        match env::var("OPENAI_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(CredentialError::Missing(path.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings_with_key_file(path: &str) -> Settings {
        let mut settings = Settings::default();
        settings.llm.api_key_file = path.to_string();
        settings
    }

    #[test]
    fn test_defaults_match_stock_comparison() {
        let settings = Settings::default();

        assert_eq!(settings.comparison.task, "Web Scraping");
        assert_eq!(settings.comparison.framework, "Python");
        assert_eq!(settings.comparison.objects, vec!["Scrapy", "Beautiful Soup"]);
        assert_eq!(settings.comparison.parameters, vec!["Speed"]);
        assert_eq!(settings.agent.max_iterations, 15);
    }

    #[test]
    fn test_api_key_reads_first_line() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "sk-test-123  ").unwrap();
        writeln!(file, "ignored").unwrap();

        let settings = settings_with_key_file(file.path().to_str().unwrap());
        assert_eq!(settings.api_key().unwrap(), "sk-test-123");
    }

    #[test]
    fn test_api_key_empty_file_is_rejected() {
        let file = NamedTempFile::new().unwrap();

        let settings = settings_with_key_file(file.path().to_str().unwrap());
        assert!(matches!(settings.api_key(), Err(CredentialError::Empty(_))));
    }

    #[test]
    fn test_env_overrides_use_single_underscore_prefix() {
        env::set_var("APP_LLM__MODEL", "gpt-4o-env");
        env::set_var("APP_COMPARISON__OBJECTS", "Scrapy,Selenium,Playwright");

        let settings = Settings::new();

        env::remove_var("APP_LLM__MODEL");
        env::remove_var("APP_COMPARISON__OBJECTS");

        let settings = settings.unwrap();
        assert_eq!(settings.llm.model, "gpt-4o-env");
        assert_eq!(
            settings.comparison.objects,
            vec!["Scrapy", "Selenium", "Playwright"]
        );
        assert_eq!(settings.comparison.framework, "Python");
    }

    #[test]
    fn test_settings_deserialize_partial_toml() {
        let config = Config::builder()
            .add_source(File::from_str(
                "[llm]\nmodel = \"gpt-4o\"\n[agent]\nmax_iterations = 3\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let settings: Settings = config.try_deserialize().unwrap();
        assert_eq!(settings.llm.model, "gpt-4o");
        assert_eq!(settings.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(settings.agent.max_iterations, 3);
        assert_eq!(settings.logging.level, "info");
    }
}
