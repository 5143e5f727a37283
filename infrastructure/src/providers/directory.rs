//! Provider directory backed by API keys.
//!
//! Decides which gateway serves each live agent:
//!
//! | Agent vendor | Key found | Gateway |
//! |--------------|-----------|---------|
//! | Google | Google key not starting with `sk-or-v1` | Gemini native |
//! | Google | Google OpenRouter key or OpenRouter key | OpenRouter |
//! | any other | OpenRouter key | OpenRouter |
//!
//! No key means no binding; the agent then answers with a missing-key
//! sentinel instead of calling out.

use super::gemini::GeminiGateway;
use super::openrouter::OpenRouterGateway;
use crate::config::FileProvidersConfig;
use panel_application::ports::llm_gateway::{GatewayError, LlmGateway};
use panel_application::ports::provider_directory::{ProviderBinding, ProviderDirectory};
use panel_domain::{AgentProfile, ModelRoute, resolve_route};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Prefix of OpenRouter API keys
pub const OPENROUTER_KEY_PREFIX: &str = "sk-or-v1";

/// API keys available to the panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderCredentials {
    pub openrouter: Option<String>,
    pub google: Option<String>,
    pub google_openrouter: Option<String>,
}

impl ProviderCredentials {
    /// Read keys from the environment variables named in `config`.
    ///
    /// Blank values count as missing.
    pub fn from_env(config: &FileProvidersConfig) -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            openrouter: read(&config.openrouter_key_env),
            google: read(&config.google_key_env),
            google_openrouter: read(&config.google_openrouter_key_env),
        }
    }

    /// Native Google key, if the Google key is not an OpenRouter key
    pub fn google_native_key(&self) -> Option<&str> {
        self.google
            .as_deref()
            .filter(|key| !key.starts_with(OPENROUTER_KEY_PREFIX))
    }

    /// OpenRouter key used for Google agents without a native key
    pub fn google_openrouter_key(&self) -> Option<&str> {
        self.google_openrouter
            .as_deref()
            .or(self.openrouter.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.openrouter.is_none() && self.google.is_none() && self.google_openrouter.is_none()
    }
}

enum GoogleAccess {
    Native(Arc<dyn LlmGateway>),
    OpenRouter(Arc<dyn LlmGateway>),
}

/// [`ProviderDirectory`] built from [`ProviderCredentials`]
pub struct KeyedProviderDirectory {
    openrouter: Option<Arc<dyn LlmGateway>>,
    google: Option<GoogleAccess>,
    synthesis_model: String,
}

impl KeyedProviderDirectory {
    pub fn new(
        credentials: &ProviderCredentials,
        config: &FileProvidersConfig,
    ) -> Result<Self, GatewayError> {
        let timeout = Duration::from_secs(config.request_timeout_seconds);
        let openrouter_gateway = |key: &str| -> Result<Arc<dyn LlmGateway>, GatewayError> {
            Ok(Arc::new(
                OpenRouterGateway::new(key, timeout)?
                    .with_endpoint(&config.openrouter_endpoint)
                    .with_attribution(&config.referer, &config.title),
            ))
        };

        let openrouter = credentials
            .openrouter
            .as_deref()
            .map(openrouter_gateway)
            .transpose()?;

        let google = if let Some(key) = credentials.google_native_key() {
            let gateway = GeminiGateway::new(key, timeout)?.with_base_url(&config.gemini_base_url);
            Some(GoogleAccess::Native(Arc::new(gateway)))
        } else if let Some(key) = credentials.google_openrouter_key() {
            Some(GoogleAccess::OpenRouter(openrouter_gateway(key)?))
        } else {
            None
        };

        debug!(
            "Providers: openrouter={}, google={}",
            openrouter.is_some(),
            match &google {
                Some(GoogleAccess::Native(_)) => "native",
                Some(GoogleAccess::OpenRouter(_)) => "openrouter",
                None => "none",
            }
        );

        Ok(Self {
            openrouter,
            google,
            synthesis_model: config.synthesis_model.clone(),
        })
    }
}

impl ProviderDirectory for KeyedProviderDirectory {
    fn agent_binding(&self, profile: &AgentProfile) -> Option<ProviderBinding> {
        if profile.vendor.is_google() {
            return match self.google.as_ref()? {
                GoogleAccess::Native(gateway) => Some(ProviderBinding::new(
                    Arc::clone(gateway),
                    resolve_route(profile, true),
                )),
                GoogleAccess::OpenRouter(gateway) => Some(ProviderBinding::new(
                    Arc::clone(gateway),
                    resolve_route(profile, false),
                )),
            };
        }

        let gateway = self.openrouter.as_ref()?;
        Some(ProviderBinding::new(
            Arc::clone(gateway),
            resolve_route(profile, false),
        ))
    }

    fn synthesis_binding(&self) -> Option<ProviderBinding> {
        let gateway = self.openrouter.as_ref()?;
        Some(ProviderBinding::new(
            Arc::clone(gateway),
            ModelRoute::OpenRouter {
                model: self.synthesis_model.clone(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use panel_domain::Vendor;
    use panel_domain::agent::routing::GEMINI_ANSWER_MODEL;

    fn directory(credentials: ProviderCredentials) -> KeyedProviderDirectory {
        KeyedProviderDirectory::new(&credentials, &FileProvidersConfig::default()).unwrap()
    }

    fn gemini() -> AgentProfile {
        AgentProfile::new("Gemini", Vendor::Google, "")
    }

    fn claude() -> AgentProfile {
        AgentProfile::new("Claude", Vendor::Anthropic, "")
    }

    #[test]
    fn test_no_keys_no_bindings() {
        let dir = directory(ProviderCredentials::default());
        assert!(dir.agent_binding(&claude()).is_none());
        assert!(dir.agent_binding(&gemini()).is_none());
        assert!(dir.synthesis_binding().is_none());
    }

    #[test]
    fn test_native_google_key() {
        let dir = directory(ProviderCredentials {
            google: Some("AIza-native".into()),
            ..Default::default()
        });
        let binding = dir.agent_binding(&gemini()).unwrap();
        assert!(binding.route.is_native_google());
        assert_eq!(binding.route.answer_model(), GEMINI_ANSWER_MODEL);
        assert_eq!(binding.gateway.provider_name(), "gemini");
        assert!(dir.agent_binding(&claude()).is_none());
    }

    #[test]
    fn test_openrouter_style_google_key_falls_back_to_openrouter() {
        let dir = directory(ProviderCredentials {
            google: Some("sk-or-v1-abc".into()),
            openrouter: Some("sk-or-v1-main".into()),
            ..Default::default()
        });
        let binding = dir.agent_binding(&gemini()).unwrap();
        assert!(!binding.route.is_native_google());
        assert_eq!(binding.gateway.provider_name(), "openrouter");
    }

    #[test]
    fn test_openrouter_key_serves_other_vendors_and_synthesis() {
        let dir = directory(ProviderCredentials {
            openrouter: Some("sk-or-v1-main".into()),
            ..Default::default()
        });
        let binding = dir.agent_binding(&claude()).unwrap();
        assert_eq!(binding.route.answer_model(), "anthropic/claude-3-haiku");
        let synthesis = dir.synthesis_binding().unwrap();
        assert_eq!(synthesis.route.answer_model(), "openai/gpt-4o-mini");
    }

    #[test]
    fn test_google_native_key_filter() {
        let credentials = ProviderCredentials {
            google: Some("sk-or-v1-xyz".into()),
            google_openrouter: Some("sk-or-v1-google".into()),
            ..Default::default()
        };
        assert!(credentials.google_native_key().is_none());
        assert_eq!(credentials.google_openrouter_key(), Some("sk-or-v1-google"));
        assert!(!credentials.is_empty());
    }
}
