//! Cerebras preset over the chat-completions adapter.

use std::sync::Arc;

use scommon::GenerationOptions;

use super::chat_completions::{ChatCompletionsConfig, ChatCompletionsProvider};
use crate::{HttpTransport, SecretString};

pub const CEREBRAS_PROVIDER_NAME: &str = "cerebras";
pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1";
pub const DEFAULT_MODEL: &str = "llama3.1-8b";

impl ChatCompletionsConfig {
    pub fn cerebras(api_key: impl Into<SecretString>) -> Self {
        Self::new(api_key, DEFAULT_BASE_URL, DEFAULT_MODEL)
            .with_options(GenerationOptions::new(0.6, 4096, 1.0))
    }
}

impl ChatCompletionsProvider {
    pub fn cerebras(api_key: impl Into<SecretString>, transport: Arc<dyn HttpTransport>) -> Self {
        Self::new(
            CEREBRAS_PROVIDER_NAME,
            ChatCompletionsConfig::cerebras(api_key),
            transport,
        )
    }
}
