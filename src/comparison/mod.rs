//! Comparison domain: the request the model expands and the result the agent produces

pub mod parser;
pub mod prompt;

use crate::agent::AgentStep;
use crate::config::ComparisonConfig;
use parser::Expansion;
use serde::{Deserialize, Serialize};

/// Floor the expansion prompt asks the model to reach for each list
pub const MIN_SUGGESTIONS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub task: String,
    pub framework: String,
    pub objects: Vec<String>,
    pub parameters: Vec<String>,
}

impl ComparisonRequest {
    pub fn new(task: impl Into<String>, framework: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            framework: framework.into(),
            objects: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn with_objects<I, S>(mut self, objects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.objects = objects.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_parameters<I, S>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters = parameters.into_iter().map(Into::into).collect();
        self
    }

    pub fn from_config(config: &ComparisonConfig) -> Self {
        Self::new(&config.task, &config.framework)
            .with_objects(config.objects.iter().cloned())
            .with_parameters(config.parameters.iter().cloned())
    }

    /// Replace the working lists with the model's expanded ones.
    ///
    /// Nothing is enforced; shortfalls against the prompt's instructions are logged.
    pub fn apply_expansion(&mut self, expansion: Expansion) {
        for note in expansion.shortfalls(self) {
            tracing::warn!("{}", note);
        }

        tracing::info!(
            "Expanded to {} objects and {} parameters",
            expansion.objects.len(),
            expansion.parameters.len()
        );

        self.objects = expansion.objects;
        self.parameters = expansion.parameters;
    }
}

/// Final output of the comparison agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Free-form model output, expected (not required) to be JSON
    pub output: String,
    pub steps: Vec<AgentStep>,
    /// False when the agent hit its iteration cap
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ComparisonRequest {
        ComparisonRequest::new("Web Scraping", "Python")
            .with_objects(["Scrapy", "Beautiful Soup"])
            .with_parameters(["Speed"])
    }

    #[test]
    fn test_from_config_uses_stock_example() {
        let request = ComparisonRequest::from_config(&ComparisonConfig::default());
        assert_eq!(request, seeded());
    }

    #[test]
    fn test_apply_expansion_replaces_lists() {
        let mut request = seeded();
        request.apply_expansion(Expansion {
            objects: vec!["Scrapy".into(), "Beautiful Soup".into(), "Selenium".into()],
            parameters: vec!["Speed".into(), "Ease of use".into()],
        });

        assert_eq!(request.task, "Web Scraping");
        assert_eq!(request.objects, vec!["Scrapy", "Beautiful Soup", "Selenium"]);
        assert_eq!(request.parameters, vec!["Speed", "Ease of use"]);
    }
}
