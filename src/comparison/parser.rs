//! Structured parsing of the expansion reply

use super::{ComparisonRequest, MIN_SUGGESTIONS};
use crate::core::llm::{JsonSchemaFormat, ResponseFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("static regex")
});

/// Objects and comparison parameters proposed by the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expansion {
    #[serde(alias = "objs")]
    pub objects: Vec<String>,
    #[serde(alias = "params")]
    pub parameters: Vec<String>,
}

impl Expansion {
    /// Ways this expansion falls short of what the prompt asked for
    pub fn shortfalls(&self, seeds: &ComparisonRequest) -> Vec<String> {
        let mut notes = Vec::new();

        for (label, seeded, expanded) in [
            ("object", &seeds.objects, &self.objects),
            ("parameter", &seeds.parameters, &self.parameters),
        ] {
            if expanded.len() < MIN_SUGGESTIONS {
                notes.push(format!(
                    "Model returned {} {}s, fewer than the requested {}",
                    expanded.len(),
                    label,
                    MIN_SUGGESTIONS
                ));
            }

            for seed in seeded {
                let kept = expanded
                    .iter()
                    .any(|item| item.trim().eq_ignore_ascii_case(seed.trim()));
                if !kept {
                    notes.push(format!("Model dropped seed {} '{}'", label, seed));
                }
            }
        }

        notes
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("no JSON object found in model reply")]
    NoJson,

    #[error("model reply does not match the expansion schema: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// JSON Schema for [`Expansion`]
pub fn json_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "objects": {
                "type": "array",
                "description": "List of objects/tools to be compared",
                "items": {"type": "string"}
            },
            "parameters": {
                "type": "array",
                "description": "List of comparison parameters",
                "items": {"type": "string"}
            }
        },
        "required": ["objects", "parameters"],
        "additionalProperties": false
    })
}

/// Instructions appended to the system prompt describing the reply format
pub fn format_instructions() -> String {
    let schema = serde_json::to_string(&json_schema()).unwrap_or_default();

    format!(
        "Respond with a single JSON object that conforms to the JSON schema below. \
         Do not add any text before or after it.\n\n\
         For example, the schema {{\"properties\": {{\"tags\": {{\"type\": \"array\", \"items\": {{\"type\": \"string\"}}}}}}, \"required\": [\"tags\"]}} \
         is satisfied by {{\"tags\": [\"fast\", \"async\"]}} but not by {{\"properties\": {{\"tags\": [\"fast\", \"async\"]}}}}.\n\n\
         Output schema:\n```\n{}\n```",
        schema
    )
}

/// `response_format` asking the service to enforce the schema itself
pub fn response_format() -> ResponseFormat {
    ResponseFormat::JsonSchema {
        json_schema: JsonSchemaFormat {
            name: "comparison_expansion".to_string(),
            description: Some("Objects and comparison parameters for a task".to_string()),
            schema: json_schema(),
            strict: true,
        },
    }
}

/// Pull the JSON object out of a free-text reply and deserialize it
pub fn parse(text: &str) -> Result<Expansion, ParseError> {
    let candidate = extract_json(text).ok_or(ParseError::NoJson)?;
    Ok(serde_json::from_str(candidate)?)
}

fn extract_json(text: &str) -> Option<&str> {
    if let Some(captures) = FENCED_JSON.captures(text) {
        return captures.get(1).map(|m| m.as_str());
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
