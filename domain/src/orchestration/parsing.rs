//! Provider reply parsing.
//!
//! Providers are asked for JSON but routinely wrap it in markdown fences,
//! rename fields, drop fields, or answer in plain prose. These functions
//! turn whatever came back into domain values without ever failing for an
//! agent reply.
//!
//! # Field aliases
//!
//! | Provider field | Canonical field |
//! |----------------|-----------------|
//! | `response`     | `answer`        |
//! | `reasoning`    | `rationale`     |
//!
//! A canonical field present in the reply always wins over its alias.

use super::value_objects::{AgentResponse, SynthesisReply};
use serde_json::{Map, Value};

/// Alias → canonical field name.
pub const FIELD_ALIASES: &[(&str, &str)] = &[("response", "answer"), ("reasoning", "rationale")];

/// Confidence assumed when a JSON reply omits it.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Rationale assumed when a JSON reply omits it.
pub const DEFAULT_RATIONALE: &str = "No rationale provided.";

/// Confidence given to a reply that was not JSON at all.
pub const UNSTRUCTURED_CONFIDENCE: f64 = 0.7;

/// Rationale given to a reply that was not JSON at all.
pub const UNSTRUCTURED_RATIONALE: &str = "Provider returned unstructured text.";

/// Source recorded for a reply that was not JSON at all.
pub const UNSTRUCTURED_SOURCE: &str = "Raw Output";

/// Remove markdown code fences around a JSON payload.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse an agent's raw reply into an [`AgentResponse`] attributed to `name`.
///
/// JSON objects with an `answer` (or `response`) string are read field by
/// field with the defaults above. Anything else becomes an unstructured
/// response whose answer is the raw text.
pub fn parse_agent_reply(name: &str, raw: &str) -> AgentResponse {
    let cleaned = strip_code_fences(raw);
    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => {
            structured_reply(name, normalize_aliases(map)).unwrap_or_else(|| unstructured_reply(name, raw))
        }
        _ => unstructured_reply(name, raw),
    }
}

/// Parse a synthesis provider's raw reply.
///
/// All four [`SynthesisReply`] fields are required.
pub fn parse_synthesis_reply(raw: &str) -> Result<SynthesisReply, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(raw))
}

fn normalize_aliases(mut map: Map<String, Value>) -> Map<String, Value> {
    for (alias, canonical) in FIELD_ALIASES {
        if !map.contains_key(*canonical)
            && let Some(value) = map.remove(*alias)
        {
            map.insert((*canonical).to_string(), value);
        }
    }
    map
}

fn structured_reply(name: &str, map: Map<String, Value>) -> Option<AgentResponse> {
    let answer = map.get("answer")?.as_str()?.to_string();
    let rationale = map
        .get("rationale")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_RATIONALE)
        .to_string();
    let confidence = map
        .get("confidence")
        .and_then(confidence_value)
        .unwrap_or(DEFAULT_CONFIDENCE);
    let sources = map.get("sources").map(source_list).unwrap_or_default();

    Some(AgentResponse::new(name, answer, rationale, confidence).with_sources(sources))
}

fn unstructured_reply(name: &str, raw: &str) -> AgentResponse {
    AgentResponse::new(name, raw, UNSTRUCTURED_RATIONALE, UNSTRUCTURED_CONFIDENCE)
        .with_sources(vec![UNSTRUCTURED_SOURCE.to_string()])
}

fn confidence_value(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (!parsed.is_nan()).then_some(parsed)
}

fn source_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}
