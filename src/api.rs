//! Comparison pipeline facade
//!
//! Runs the three steps in order: build the expansion prompt, parse the
//! model's reply into objects and parameters, then let the scraping agent
//! compare them.

use crate::agent::run_agent;
use crate::comparison::{parser, prompt, ComparisonRequest, ComparisonResult};
use crate::config::Settings;
use crate::core::llm::{ChatModel, LLMClient};
use crate::tools::registry::ToolRegistry;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Raw model reply to the expansion prompt, alongside its parsed form
#[derive(Debug, Clone)]
pub struct ExpansionReply {
    pub raw: String,
    pub expansion: parser::Expansion,
}

pub struct ComparisonBot {
    model: Arc<dyn ChatModel>,
    tools: ToolRegistry,
    settings: Settings,
}

impl ComparisonBot {
    pub fn new(model: Arc<dyn ChatModel>, settings: Settings) -> Self {
        let tools = ToolRegistry::for_comparison(&settings.scrape);
        Self {
            model,
            tools,
            settings,
        }
    }

    /// Bot backed by the OpenAI-compatible client
    pub fn from_settings(settings: Settings, api_key: String) -> Self {
        let client = LLMClient::new(api_key, settings.clone());
        Self::new(Arc::new(client), settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Ask the model to extend the seed lists. A reply that does not parse is fatal.
    pub async fn expand(&self, request: &ComparisonRequest) -> Result<ExpansionReply> {
        let messages = prompt::expansion_prompt(request, &parser::format_instructions());
        let response_format = self
            .settings
            .llm
            .structured_output
            .then(parser::response_format);

        tracing::info!(
            "Requesting objects and parameters for '{}' in {}",
            request.task,
            request.framework
        );

        let reply = self
            .model
            .chat_with_format(&messages, response_format)
            .await
            .context("expansion request failed")?;

        tracing::debug!("Expansion reply:\n{}", reply);

        let expansion = parser::parse(&reply)
            .with_context(|| format!("could not parse expansion reply:\n{}", reply))?;

        Ok(ExpansionReply {
            raw: reply,
            expansion,
        })
    }

    /// Run the scraping agent over the request's current lists
    pub async fn compare(&self, request: &ComparisonRequest) -> Result<ComparisonResult> {
        self.compare_with_limit(request, self.settings.agent.max_iterations)
            .await
    }

    pub async fn compare_with_limit(
        &self,
        request: &ComparisonRequest,
        max_iterations: usize,
    ) -> Result<ComparisonResult> {
        let messages = prompt::comparison_prompt(request);

        let run = run_agent(self.model.as_ref(), messages, &self.tools, max_iterations)
            .await
            .context("comparison agent failed")?;

        Ok(ComparisonResult {
            output: run.output,
            steps: run.steps,
            completed: run.completed,
        })
    }

    /// Expand, merge the expansion back into `request`, then compare
    pub async fn run(&self, request: &mut ComparisonRequest) -> Result<ComparisonResult> {
        let reply = self.expand(request).await?;
        request.apply_expansion(reply.expansion);
        self.compare(request).await
    }
}
