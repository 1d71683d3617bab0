//! Environment-backed gateway configuration.
//!
//! ```rust
//! use switchyard::GatewayConfig;
//!
//! let config = GatewayConfig::from_lookup(|name| match name {
//!     "GROQ_API_KEY" => Some("gsk-example".to_string()),
//!     "GROQ_MODEL" => Some("llama-3.3-70b-versatile".to_string()),
//!     _ => None,
//! })
//! .expect("one provider is configured");
//!
//! assert!(config.openai.is_none());
//! assert_eq!(config.groq.as_ref().map(|groq| groq.model.as_str()), Some("llama-3.3-70b-versatile"));
//! assert_eq!(config.provider_count(), 1);
//! ```

use std::path::PathBuf;

use sprovider::{ChatCompletionsConfig, ResponsesConfig};
use srotator::DEFAULT_STATE_FILE_NAME;

use crate::GatewayError;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const GROQ_API_KEY: &str = "GROQ_API_KEY";
pub const GROQ_MODEL: &str = "GROQ_MODEL";
pub const GROQ_BASE_URL: &str = "GROQ_BASE_URL";
pub const CEREBRAS_API_KEY: &str = "CEREBRAS_API_KEY";
pub const CEREBRAS_MODEL: &str = "CEREBRAS_MODEL";
pub const CEREBRAS_BASE_URL: &str = "CEREBRAS_BASE_URL";
pub const STATE_FILE: &str = "SWITCHYARD_STATE_FILE";

/// Settings for every provider that has a credential, plus the shared
/// rotation state location. Providers rotate in the order openai, groq,
/// cerebras.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub openai: Option<ResponsesConfig>,
    pub groq: Option<ChatCompletionsConfig>,
    pub cerebras: Option<ChatCompletionsConfig>,
    pub state_file: PathBuf,
}

impl GatewayConfig {
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any name-to-value lookup. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let openai = read(OPENAI_API_KEY).map(|key| {
            let mut config = ResponsesConfig::new(key);
            if let Some(model) = read(OPENAI_MODEL) {
                config = config.with_model(model);
            }
            if let Some(base_url) = read(OPENAI_BASE_URL) {
                config = config.with_base_url(base_url);
            }
            config
        });

        let groq = read(GROQ_API_KEY).map(|key| {
            apply_overrides(
                ChatCompletionsConfig::groq(key),
                read(GROQ_MODEL),
                read(GROQ_BASE_URL),
            )
        });

        let cerebras = read(CEREBRAS_API_KEY).map(|key| {
            apply_overrides(
                ChatCompletionsConfig::cerebras(key),
                read(CEREBRAS_MODEL),
                read(CEREBRAS_BASE_URL),
            )
        });

        let state_file = read(STATE_FILE)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_STATE_FILE_NAME));

        let config = Self {
            openai,
            groq,
            cerebras,
            state_file,
        };

        if config.provider_count() == 0 {
            return Err(GatewayError::configuration(format!(
                "no provider API key configured; set {OPENAI_API_KEY}, {GROQ_API_KEY} or {CEREBRAS_API_KEY}"
            )));
        }

        Ok(config)
    }

    pub fn provider_count(&self) -> usize {
        usize::from(self.openai.is_some())
            + usize::from(self.groq.is_some())
            + usize::from(self.cerebras.is_some())
    }
}

fn apply_overrides(
    mut config: ChatCompletionsConfig,
    model: Option<String>,
    base_url: Option<String>,
) -> ChatCompletionsConfig {
    if let Some(model) = model {
        config = config.with_model(model);
    }
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    config
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::GatewayConfig;
    use crate::GatewayErrorKind;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values = pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |name| values.get(name).cloned()
    }

    #[test]
    fn all_providers_with_defaults() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "sk-1"),
            ("GROQ_API_KEY", "gsk-2"),
            ("CEREBRAS_API_KEY", "csk-3"),
        ]))
        .expect("config");

        let openai = config.openai.as_ref().expect("openai");
        assert_eq!(openai.model, "gpt-3.5-turbo");
        assert_eq!(openai.base_url, "https://api.openai.com/v1");
        assert!(!openai.store);

        let groq = config.groq.as_ref().expect("groq");
        assert_eq!(groq.api_key.expose(), "gsk-2");
        assert_eq!(groq.options.temperature, 0.6);

        let cerebras = config.cerebras.as_ref().expect("cerebras");
        assert_eq!(cerebras.base_url, "https://api.cerebras.ai/v1");

        assert_eq!(config.provider_count(), 3);
        assert!(config.state_file.ends_with("ai_rr_index.txt"));
    }

    #[test]
    fn overrides_and_blank_values() {
        let config = GatewayConfig::from_lookup(lookup(&[
            ("OPENAI_API_KEY", "   "),
            ("GROQ_API_KEY", "gsk-2"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_BASE_URL", "http://localhost:9000/v1"),
            ("SWITCHYARD_STATE_FILE", "/var/lib/switchyard/index"),
        ]))
        .expect("config");

        assert!(config.openai.is_none());
        assert!(config.cerebras.is_none());
        let groq = config.groq.as_ref().expect("groq");
        assert_eq!(groq.model, "llama-3.1-8b-instant");
        assert_eq!(groq.base_url, "http://localhost:9000/v1");
        assert_eq!(
            config.state_file,
            PathBuf::from("/var/lib/switchyard/index")
        );
    }

    #[test]
    fn no_keys_is_a_configuration_error() {
        let error = GatewayConfig::from_lookup(lookup(&[("OPENAI_MODEL", "gpt-4o")]))
            .expect_err("no keys");

        assert_eq!(error.kind, GatewayErrorKind::Configuration);
        assert!(error.message.contains("GROQ_API_KEY"));
    }
}
