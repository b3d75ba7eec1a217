//! tool-compare - ask a language model which tools to compare, then let a
//! web-scraping agent compare them.
//!
//! The pipeline is three sequential steps: build the expansion prompt, parse
//! the reply into objects and comparison parameters, and run a single-tool
//! agent that produces the final (JSON-ish) comparison.

pub mod agent;
pub mod comparison;
mod config;
pub mod core;
pub mod tools;
pub mod utils;

pub mod api;
pub mod cli;

pub use api::{ComparisonBot, ExpansionReply};
pub use comparison::{parser::Expansion, ComparisonRequest, ComparisonResult};
pub use crate::config::{CredentialError, Settings};
pub use crate::config::{AgentConfig, ComparisonConfig, LLMConfig, LoggingConfig, ScrapeConfig};
