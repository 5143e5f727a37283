//! Provider routing for live agents.
//!
//! Picks the endpoint and model that serve a given [`AgentProfile`]. Routing
//! is keyed on the agent *name* first (a "Claude" persona always lands on an
//! Anthropic model), and on the vendor only to decide whether Google's native
//! API can be used.

use super::profile::AgentProfile;

/// OpenRouter model used when no name rule matches.
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-3.5-turbo";

/// Gemini model for answers on the native Google API.
pub const GEMINI_ANSWER_MODEL: &str = "gemini-1.5-flash";

/// Gemini model for critiques on the native Google API.
pub const GEMINI_CRITIQUE_MODEL: &str = "gemini-1.5-pro";

/// Name fragment → OpenRouter model id. First match wins.
const OPENROUTER_MODELS: &[(&str, &str)] = &[
    ("ChatGPT", "openai/gpt-4o-mini"),
    ("Claude", "anthropic/claude-3-haiku"),
    ("Copilot", "microsoft/wizardlm-2-8x22b"),
    ("Grok", "meta-llama/llama-3.1-70b-instruct"),
    ("Perplexity", "perplexity/llama-3-sonar-large-32k-online"),
    ("DeepSeek", "deepseek/deepseek-chat"),
    ("Character", "meta-llama/llama-3-70b-instruct"),
];

/// Where a live agent sends its requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelRoute {
    /// OpenAI-compatible chat completions on OpenRouter
    OpenRouter { model: String },
    /// Google's native `generateContent` API
    GeminiNative {
        answer_model: String,
        critique_model: String,
    },
}

impl ModelRoute {
    pub fn answer_model(&self) -> &str {
        match self {
            ModelRoute::OpenRouter { model } => model,
            ModelRoute::GeminiNative { answer_model, .. } => answer_model,
        }
    }

    pub fn critique_model(&self) -> &str {
        match self {
            ModelRoute::OpenRouter { model } => model,
            ModelRoute::GeminiNative { critique_model, .. } => critique_model,
        }
    }

    pub fn is_native_google(&self) -> bool {
        matches!(self, ModelRoute::GeminiNative { .. })
    }
}

/// Look up the OpenRouter model id for an agent name.
pub fn openrouter_model_for(name: &str) -> &'static str {
    OPENROUTER_MODELS
        .iter()
        .find(|(fragment, _)| name.contains(fragment))
        .map(|(_, model)| *model)
        .unwrap_or(DEFAULT_OPENROUTER_MODEL)
}

/// Resolve the route for a profile.
///
/// `google_native` is true when a native Google key (not an OpenRouter key)
/// is available; only Google-vendor agents use it.
pub fn resolve_route(profile: &AgentProfile, google_native: bool) -> ModelRoute {
    if profile.vendor.is_google() && google_native {
        ModelRoute::GeminiNative {
            answer_model: GEMINI_ANSWER_MODEL.to_string(),
            critique_model: GEMINI_CRITIQUE_MODEL.to_string(),
        }
    } else {
        ModelRoute::OpenRouter {
            model: openrouter_model_for(&profile.name).to_string(),
        }
    }
}
