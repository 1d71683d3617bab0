//! Groq preset over the chat-completions adapter.

use std::sync::Arc;

use scommon::GenerationOptions;

use super::chat_completions::{ChatCompletionsConfig, ChatCompletionsProvider};
use crate::{HttpTransport, SecretString};

pub const GROQ_PROVIDER_NAME: &str = "groq";
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "moonshotai/kimi-k2-instruct-0905";

impl ChatCompletionsConfig {
    pub fn groq(api_key: impl Into<SecretString>) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL)
            .with_options(GenerationOptions::new(0.6, 4096, 1.0))
    }
}

impl ChatCompletionsProvider {
    pub fn groq(api_key: impl Into<SecretString>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(
            GROQ_PROVIDER_NAME,
            ChatCompletionsConfig::groq(api_key),
            transport,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BASE_URL, DEFAULT_MODEL};
    use crate::adapters::chat_completions::ChatCompletionsConfig;

    #[test]
    fn groq_defaults_match_the_hosted_service() {
        let config = ChatCompletionsConfig::groq("gsk-test");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.options.temperature, 0.6);
        assert_eq!(config.options.max_tokens, 4096);
        assert_eq!(config.options.top_p, 1.0);
        assert!(config.stop.is_none());
    }
}
