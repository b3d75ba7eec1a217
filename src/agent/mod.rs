//! Tool-calling agent loop
//!
//! Information Hiding:
//! - Conversation bookkeeping hidden
//! - Tool dispatch and argument decoding hidden
//! - Iteration cap enforced internally

mod agent_loop;

pub use agent_loop::{run_agent, ITERATION_LIMIT_OUTPUT};

use serde::{Deserialize, Serialize};

/// One tool invocation made by the agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStep {
    pub iteration: usize,
    pub tool: String,
    /// Raw JSON arguments as produced by the model
    pub input: String,
    pub observation: String,
}

/// Outcome of a full agent run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRun {
    pub output: String,
    pub steps: Vec<AgentStep>,
    pub completed: bool,
}
