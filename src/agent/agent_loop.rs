use super::{AgentRun, AgentStep};
use crate::core::llm::{ChatMessage, ChatModel, ToolCall};
use crate::tools::registry::ToolRegistry;
use anyhow::Result;
use serde_json::Value;

pub const ITERATION_LIMIT_OUTPUT: &str = "Agent stopped due to iteration limit.";

/// Run the tool-calling loop
///
/// 1. Ask the model, with the registry's tools attached
/// 2. If it requests tool calls, run each in order and append the results
/// 3. Repeat until it answers without tool calls or `max_iterations` is reached
///
/// Tool failures never end the run; they are handed back to the model as
/// ordinary tool output. A failing completion request does.
pub async fn run_agent(
    model: &dyn ChatModel,
    prompt: Vec<ChatMessage>,
    tools: &ToolRegistry,
    max_iterations: usize,
) -> Result<AgentRun> {
    let definitions = tools.definitions();
    let mut conversation = prompt;
    let mut steps = Vec::new();

    for iteration in 0..max_iterations {
        tracing::info!("Agent iteration {}/{}", iteration + 1, max_iterations);

        let reply = model
            .chat_completion(&conversation, Some(definitions.as_slice()), None)
            .await?;

        let calls = reply.requested_tool_calls().to_vec();
        if calls.is_empty() {
            tracing::info!("Agent finished after {} tool calls", steps.len());
            return Ok(AgentRun {
                output: reply.content.unwrap_or_default(),
                steps,
                completed: true,
            });
        }

        conversation.push(reply);

        for call in calls {
            tracing::info!(
                "Invoking tool '{}' with {}",
                call.function.name,
                call.function.arguments
            );

            let observation = invoke(tools, &call).await;
            tracing::debug!("Tool observation: {}", observation);

            conversation.push(ChatMessage::tool(&call.id, &observation));
            steps.push(AgentStep {
                iteration,
                tool: call.function.name,
                input: call.function.arguments,
                observation,
            });
        }
    }

    tracing::warn!("Agent hit the iteration limit ({})", max_iterations);

    Ok(AgentRun {
        output: ITERATION_LIMIT_OUTPUT.to_string(),
        steps,
        completed: false,
    })
}

async fn invoke(tools: &ToolRegistry, call: &ToolCall) -> String {
    let name = &call.function.name;

    let tool = match tools.get(name) {
        Some(t) => t,
        None => {
            tracing::warn!("Model requested unknown tool '{}'", name);
            return format!("Tool '{}' not found", name);
        }
    };

    let args: Value = match serde_json::from_str(&call.function.arguments) {
        Ok(v) => v,
        Err(e) => return format!("Invalid arguments for tool '{}': {}", name, e),
    };

    match tool.execute(args).await {
        Ok(result) => result.observation(),
        Err(e) => {
            tracing::error!("Tool execution error: {}", e);
            format!("Tool execution failed: {}", e)
        }
    }
}
