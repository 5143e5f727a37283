//! Prompt templates for the panel flow

use crate::agent::history::{ChatRole, ChatTurn};
use crate::orchestration::value_objects::AgentResponse;

/// Reply format every live agent is asked for.
const AGENT_RESPONSE_FORMAT: &str = r#"Respond in strict JSON with this shape:
{"answer": "...", "rationale": "...", "confidence": 0.0 to 1.0, "sources": ["..."]}"#;

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for an agent answering in the Broadcast phase
    pub fn agent_system(template: &str) -> String {
        format!("{}\n\n{}", template.trim(), AGENT_RESPONSE_FORMAT)
    }

    /// Single-string prompt for providers without a system role
    ///
    /// History turns are flattened between the persona and the query.
    pub fn flattened_query(template: &str, history: &[ChatTurn], query: &str) -> String {
        let mut prompt = format!("System: {}\n\n", template.trim());
        for turn in history {
            let speaker = match turn.role {
                ChatRole::User => "User",
                ChatRole::Assistant => "Assistant",
            };
            prompt.push_str(&format!("{}: {}\n\n", speaker, turn.content));
        }
        prompt.push_str(&format!("User: {}\n\n{}", query, AGENT_RESPONSE_FORMAT));
        prompt
    }

    /// User prompt for the Critique phase
    pub fn critique_prompt(peers: &[AgentResponse], discussion_rules: Option<&str>) -> String {
        let peers_json = serde_json::to_string(peers).unwrap_or_else(|_| "[]".to_string());
        let mut prompt = format!(
            "Briefly critique these answers (1 sentence max): {}",
            peers_json
        );
        if let Some(rules) = discussion_rules.map(str::trim).filter(|r| !r.is_empty()) {
            prompt.push_str(&format!("\n\nDiscussion rules:\n{}", rules));
        }
        prompt
    }

    /// System prompt for the Synthesis phase, if any instructions are configured
    pub fn synthesis_system(system_prompt: &str, combiner_rules: &str) -> Option<String> {
        let parts: Vec<&str> = [system_prompt.trim(), combiner_rules.trim()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join("\n\n"))
        }
    }

    /// User prompt for the Synthesis phase
    ///
    /// `query` must already be sanitized.
    pub fn synthesis_prompt(query: &str, valid: &[&AgentResponse], critiques: &[String]) -> String {
        let mut prompt = format!(
            r#"You are the Chief Editor of an AI expert panel.

User Query: "{}"

Here are the draft answers from your team of specialists:
"#,
            query
        );

        for r in valid {
            prompt.push_str(&format!(
                "\n--- Agent: {} (Confidence: {}) ---\n{}\nRationale: {}\n",
                r.name, r.confidence, r.answer, r.rationale
            ));
        }

        if !critiques.is_empty() {
            prompt.push_str("\nHere are their cross-critiques:\n");
            prompt.push_str(&critiques.join("\n"));
            prompt.push('\n');
        }

        prompt.push_str(
            r#"
Your Task:
1. Synthesize a single, highly detailed, and comprehensive Final Answer.
2. Merge the best insights from all agents.
3. Resolve minor disagreements; note major ones.
4. Maintain a professional, user-facing tone.

Output Format (Strict JSON):
{
    "final_answer": "The detailed synthesized text...",
    "combined_confidence": 0.0 to 1.0 (average of input confidence),
    "disagreement": "Summary of any conflicts...",
    "recommended_next_steps": "Follow-up actions..."
}"#,
        );

        prompt
    }
}
