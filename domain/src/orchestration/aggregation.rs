//! Aggregation rules for combining agent responses.
//!
//! Pure functions used by the combiner around its single synthesis call:
//!
//! | Function | When |
//! |----------|------|
//! | [`valid_responses`] | Before synthesis, to pick the responses that count |
//! | [`no_valid_responses`] | No response is valid; synthesis is skipped |
//! | [`heuristic_fallback`] | Synthesis failed; the top-confidence answer wins |

use super::value_objects::{AgentResponse, OrchestrationResult};

/// Responses with `confidence > 0`, in roster order.
pub fn valid_responses(responses: &[AgentResponse]) -> Vec<&AgentResponse> {
    responses.iter().filter(|r| r.is_valid()).collect()
}

/// Terminal result when every agent failed.
pub fn no_valid_responses() -> OrchestrationResult {
    OrchestrationResult::all_agents_failed()
}

/// Deterministic fallback when synthesis is unavailable.
///
/// Sorts by confidence descending with a stable sort, so equal confidences
/// keep roster order and the earlier agent wins. Returns `None` when `valid`
/// is empty.
pub fn heuristic_fallback(valid: &[&AgentResponse]) -> Option<OrchestrationResult> {
    let mut ranked = valid.to_vec();
    ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    ranked.first().map(|top| OrchestrationResult::fallback(top))
}
