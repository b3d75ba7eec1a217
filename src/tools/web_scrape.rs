//! Web Scrape Tool
//!
//! Information Hiding:
//! - HTTP client and timeout handling hidden
//! - HTML parsing and text extraction hidden
//! - Fetch errors turned into plain observations

use super::{Tool, ToolMetadata, ToolParameter, ToolResult};
use crate::config::ScrapeConfig;
use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{Html, Selector};
use serde_json::Value;
use std::error::Error as _;
use std::fmt;
use tokio::time::Duration;

pub const TOOL_NAME: &str = "web_scrape";

const NO_HEADING: &str = "No heading found";
const NO_PARAGRAPHS: &str = "No paragraphs found";

static HEADING: Lazy<Selector> = Lazy::new(|| Selector::parse("h1").expect("static selector"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| Selector::parse("p").expect("static selector"));

/// Text pulled out of a fetched page: the first `<h1>` and every `<p>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedPage {
    pub heading: Option<String>,
    pub paragraphs: Vec<String>,
}

impl ScrapedPage {
    pub fn parse(html: &str) -> Self {
        let document = Html::parse_document(html);

        let heading = document
            .select(&HEADING)
            .next()
            .map(|h| h.text().collect::<String>());

        let paragraphs = document
            .select(&PARAGRAPH)
            .map(|p| p.text().collect::<String>())
            .collect();

        Self { heading, paragraphs }
    }
}

impl fmt::Display for ScrapedPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let heading = self.heading.as_deref().unwrap_or(NO_HEADING);
        let paragraphs = if self.paragraphs.is_empty() {
            NO_PARAGRAPHS.to_string()
        } else {
            self.paragraphs.join("\n")
        };

        write!(f, "Heading: {}\n\nParagraphs:\n{}", heading, paragraphs)
    }
}

/// Fetches a page and reports its main heading and paragraph text
pub struct WebScrapeTool {
    client: Client,
    timeout_secs: u64,
    user_agent: String,
}

impl WebScrapeTool {
    pub fn new(timeout_secs: u64) -> Self {
        Self::from_config(&ScrapeConfig {
            timeout_secs,
            ..ScrapeConfig::default()
        })
    }

    pub fn from_config(config: &ScrapeConfig) -> Self {
        Self {
            client: Client::new(),
            timeout_secs: config.timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Scrape `url` and return the text the model would see.
    ///
    /// Never fails: transport errors and non-2xx statuses come back as a
    /// `Failed to fetch the URL: ...` string.
    pub async fn scrape(&self, url: &str) -> String {
        self.run(url).await.observation()
    }

    async fn run(&self, url: &str) -> ToolResult {
        tracing::info!("Scraping {}", url);

        match self.fetch(url).await {
            Ok(body) => {
                let page = ScrapedPage::parse(&body);
                tracing::debug!(
                    "Scraped {}: heading={:?}, {} paragraphs",
                    url,
                    page.heading,
                    page.paragraphs.len()
                );
                ToolResult::success(page.to_string())
            }
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                ToolResult::failure(format!("Failed to fetch the URL: {}", describe(&e)))
            }
        }
    }

    async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        self.client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .timeout(Duration::from_secs(self.timeout_secs))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

/// reqwest hides the interesting part (DNS, refused connection) in the source chain
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[async_trait]
impl Tool for WebScrapeTool {
    fn metadata(&self) -> ToolMetadata {
        ToolMetadata {
            name: TOOL_NAME.to_string(),
            description: "Scrapes the main heading and paragraphs of a given URL".to_string(),
            parameters: vec![ToolParameter {
                name: "url".to_string(),
                param_type: "string".to_string(),
                description: "The URL of the page to scrape".to_string(),
                required: true,
            }],
        }
    }

    fn validate(&self, args: &Value) -> Result<()> {
        args["url"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("'url' parameter is required and must be a string"))?;

        Ok(())
    }

    async fn execute(&self, args: Value) -> Result<ToolResult> {
        self.validate(&args)?;

        let url = args["url"].as_str().unwrap_or_default().trim();
        Ok(self.run(url).await)
    }
}
