//! Provider construction from a [`GatewayConfig`].

use std::sync::Arc;

use reqwest::Client;
use sprovider::adapters::cerebras::CEREBRAS_PROVIDER_NAME;
use sprovider::adapters::groq::GROQ_PROVIDER_NAME;
use sprovider::{
    ChatCompletionsProvider, ChatProvider, HttpTransport, OpenAiProvider, ProviderStreamHooks,
    ReqwestTransport,
};

use crate::{GatewayConfig, GatewayError};

/// Shared reqwest transport without an overall request timeout.
pub fn default_transport() -> Result<Arc<dyn HttpTransport>, GatewayError> {
    let client = Client::builder()
        .user_agent(concat!("switchyard/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|err| GatewayError::configuration(format!("failed to build HTTP client: {err}")))?;

    Ok(Arc::new(ReqwestTransport::new(client)))
}

/// Adapters for every configured provider, in rotation order.
pub fn build_providers(
    config: &GatewayConfig,
    transport: Arc<dyn HttpTransport>,
    hooks: Arc<dyn ProviderStreamHooks>,
) -> Vec<Arc<dyn ChatProvider>> {
    let mut providers: Vec<Arc<dyn ChatProvider>> = Vec::with_capacity(config.provider_count());

    if let Some(openai) = &config.openai {
        providers.push(Arc::new(
            OpenAiProvider::new(openai.clone(), transport.clone()).with_hooks(hooks.clone()),
        ));
    }

    if let Some(groq) = &config.groq {
        providers.push(Arc::new(
            ChatCompletionsProvider::new(GROQ_PROVIDER_NAME, groq.clone(), transport.clone())
                .with_hooks(hooks.clone()),
        ));
    }

    if let Some(cerebras) = &config.cerebras {
        providers.push(Arc::new(
            ChatCompletionsProvider::new(CEREBRAS_PROVIDER_NAME, cerebras.clone(), transport)
                .with_hooks(hooks),
        ));
    }

    providers
}
