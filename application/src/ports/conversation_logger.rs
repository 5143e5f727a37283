//! Port for structured panel transcripts.
//!
//! Defines the [`ConversationLogger`] trait for recording what happened in a
//! panel run (sanitized query, each agent response, critiques, final result)
//! as machine-readable records, separate from `tracing` diagnostics.
//!
//! Events only ever carry sanitized query text.

use panel_domain::{AgentResponse, OrchestrationResult, Phase};
use serde_json::{Value, json};

/// A structured panel event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "agent_response", "panel_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }

    pub fn query_sanitized(sanitized: &str, redacted: bool) -> Self {
        Self::new(
            "query_sanitized",
            json!({ "query": sanitized, "redacted": redacted }),
        )
    }

    pub fn agent_response(phase: &Phase, response: &AgentResponse) -> Self {
        let mut payload = serde_json::to_value(response).unwrap_or(Value::Null);
        if let Value::Object(map) = &mut payload {
            map.insert("phase".to_string(), Value::String(phase.as_str().to_string()));
        }
        Self::new("agent_response", payload)
    }

    pub fn critique(agent: &str, text: &str) -> Self {
        Self::new("critique", json!({ "agent": agent, "text": text }))
    }

    pub fn panel_result(result: &OrchestrationResult) -> Self {
        Self::new(
            "panel_result",
            json!({
                "final_answer": result.final_answer,
                "combined_confidence": result.combined_confidence,
                "disagreement": result.disagreement,
                "recommended_next_steps": result.recommended_next_steps,
                "synthesis": result.synthesis,
                "agents": result.agents.len(),
            }),
        )
    }
}

/// Port for logging panel events to a structured log.
///
/// `log` is synchronous and non-fallible; logging failures are ignored.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
