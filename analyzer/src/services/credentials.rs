//! Provider credential loading
//!
//! One secret per provider, supplied out-of-band through the
//! environment or a `.env` file. Environment variables take precedence
//! over `.env` values, and at least one provider key must be present.
//! Keys never appear in request bodies logged for diagnostics; the
//! manual `Debug` impl redacts them.

use std::fmt;

use crate::error::{AnalyzerError, AnalyzerResult};
use shared::ProviderId;

/// API keys per provider, loaded once at startup
#[derive(Clone, Default)]
pub struct ProviderCredentials {
    openai: Option<String>,
    anthropic: Option<String>,
    gemini: Option<String>,
}

impl ProviderCredentials {
    /// Environment variables probed per provider, in precedence order
    const OPENAI_KEYS: &'static [&'static str] = &["OPENAI_API_KEY"];
    const ANTHROPIC_KEYS: &'static [&'static str] = &["ANTHROPIC_API_KEY"];
    const GEMINI_KEYS: &'static [&'static str] = &["GOOGLE_API_KEY", "GOOGLE_AI_API_KEY"];

    /// Load credentials from `.env` (if present) and the environment.
    ///
    /// Fails when no provider key is available at all — a run with zero
    /// providers could only ever produce fallback output.
    pub fn from_env() -> AnalyzerResult<Self> {
        // Silently ignores a missing .env; already-set variables win
        let _ = dotenvy::dotenv();

        let credentials = Self {
            openai: first_env(Self::OPENAI_KEYS),
            anthropic: first_env(Self::ANTHROPIC_KEYS),
            gemini: first_env(Self::GEMINI_KEYS),
        };

        if credentials.openai.is_none()
            && credentials.anthropic.is_none()
            && credentials.gemini.is_none()
        {
            return Err(AnalyzerError::config(
                "No provider API key found: set OPENAI_API_KEY, ANTHROPIC_API_KEY, \
                 or GOOGLE_API_KEY/GOOGLE_AI_API_KEY",
            ));
        }

        Ok(credentials)
    }

    /// Build credentials explicitly (tests, embedding callers)
    pub fn with_keys(
        openai: Option<String>,
        anthropic: Option<String>,
        gemini: Option<String>,
    ) -> Self {
        Self {
            openai,
            anthropic,
            gemini,
        }
    }

    pub fn key_for(&self, provider: ProviderId) -> Option<&str> {
        match provider {
            ProviderId::OpenAI => self.openai.as_deref(),
            ProviderId::Anthropic => self.anthropic.as_deref(),
            ProviderId::Gemini => self.gemini.as_deref(),
        }
    }

    pub fn available_providers(&self) -> Vec<ProviderId> {
        [ProviderId::OpenAI, ProviderId::Anthropic, ProviderId::Gemini]
            .into_iter()
            .filter(|provider| self.key_for(*provider).is_some())
            .collect()
    }
}

impl fmt::Debug for ProviderCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderCredentials")
            .field("openai", &self.openai.as_ref().map(|_| "<redacted>"))
            .field("anthropic", &self.anthropic.as_ref().map(|_| "<redacted>"))
            .field("gemini", &self.gemini.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup_and_availability() {
        let credentials = ProviderCredentials::with_keys(
            Some("sk-test".to_string()),
            None,
            Some("g-test".to_string()),
        );
        assert_eq!(credentials.key_for(ProviderId::OpenAI), Some("sk-test"));
        assert_eq!(credentials.key_for(ProviderId::Anthropic), None);
        assert_eq!(
            credentials.available_providers(),
            vec![ProviderId::OpenAI, ProviderId::Gemini]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let credentials =
            ProviderCredentials::with_keys(Some("sk-very-secret".to_string()), None, None);
        let debug = format!("{credentials:?}");
        assert!(!debug.contains("sk-very-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
