//! OpenAI provider over the shared transport and stream loop.

use std::sync::Arc;
use std::time::Duration;

use scommon::GenerationOptions;
use serde_json::Value;

use crate::stream::{
    StreamCall, StreamDialect, StreamEvent, StreamEventKind, rejection_error, run_stream,
};
use crate::transport::{HttpRequest, HttpTransport, endpoint};
use crate::{
    ChatMessage, ChatProvider, DeltaSink, MessageInput, NoopStreamHooks, ProviderError,
    ProviderFuture, ProviderStreamHooks, SecretString, normalize_messages,
};

use super::serde_api::{
    ModelListEnvelope, OUTPUT_TEXT_DELTA, REFUSAL_DELTA, RESPONSE_FAILED, ResponsesApiRequest,
    sorted_model_ids,
};

pub const OPENAI_PROVIDER_NAME: &str = "openai";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq)]
pub struct ResponsesConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub options: GenerationOptions,
    /// Whether the backend may retain the response server-side.
    pub store: bool,
}

impl ResponsesConfig {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            options: GenerationOptions::default(),
            store: false,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }
}

#[derive(Clone)]
pub struct OpenAiProvider {
    config: ResponsesConfig,
    transport: Arc<dyn HttpTransport>,
    hooks: Arc<dyn ProviderStreamHooks>,
}

impl OpenAiProvider {
    pub fn new(config: ResponsesConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            transport,
            hooks: Arc::new(NoopStreamHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderStreamHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &ResponsesConfig {
        &self.config
    }

    /// Model ids visible to the configured key, sorted ascending.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        self.require_key()?;

        let request = HttpRequest::get(
            endpoint(&self.config.base_url, "models"),
            self.config.api_key.clone(),
        )
        .with_timeout(LIST_MODELS_TIMEOUT);
        let response = self.transport.send(request).await?;

        if response.status >= 400 {
            return Err(rejection_error(
                OPENAI_PROVIDER_NAME,
                response.status,
                &response.body,
            ));
        }

        let envelope = serde_json::from_str::<ModelListEnvelope>(&response.body)
            .map_err(|_| ProviderError::http(OPENAI_PROVIDER_NAME, response.status))?;

        Ok(sorted_model_ids(envelope))
    }

    pub(crate) fn build_request(
        &self,
        messages: Vec<MessageInput>,
    ) -> Result<HttpRequest, ProviderError> {
        self.require_key()?;
        self.config
            .options
            .validate()
            .map_err(ProviderError::invalid_input)?;

        let input = normalize_messages(messages)?;
        let body = self.build_body(input)?;

        Ok(HttpRequest::post(
            endpoint(&self.config.base_url, "responses"),
            self.config.api_key.clone(),
            body,
        ))
    }

    fn build_body(&self, input: Vec<ChatMessage>) -> Result<Value, ProviderError> {
        let request = ResponsesApiRequest {
            model: &self.config.model,
            input,
            temperature: self.config.options.temperature,
            max_output_tokens: self.config.options.max_tokens,
            top_p: self.config.options.top_p,
            stream: true,
            store: self.config.store,
        };

        serde_json::to_value(request).map_err(|err| ProviderError::invalid_input(err.to_string()))
    }

    fn require_key(&self) -> Result<(), ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::configuration("no openai API key configured"));
        }

        Ok(())
    }
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        OPENAI_PROVIDER_NAME
    }

    fn stream<'a>(
        &'a self,
        messages: Vec<MessageInput>,
        on_delta: DeltaSink<'a>,
    ) -> ProviderFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            let request = self.build_request(messages)?;
            let call = StreamCall {
                provider: OPENAI_PROVIDER_NAME,
                model: &self.config.model,
                transport: self.transport.as_ref(),
                dialect: &ResponsesDialect,
                hooks: self.hooks.as_ref(),
            };

            run_stream(call, request, on_delta).await
        })
    }
}

/// Events are discriminated by their `type` tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponsesDialect;

impl StreamDialect for ResponsesDialect {
    fn decode(&self, payload: Value) -> StreamEvent {
        let kind = match payload.get("type").and_then(Value::as_str) {
            Some(OUTPUT_TEXT_DELTA) => StreamEventKind::TextDelta,
            Some(REFUSAL_DELTA) => StreamEventKind::RefusalDelta,
            Some(RESPONSE_FAILED) => StreamEventKind::Failed,
            _ => return StreamEvent::other(payload),
        };

        let delta = payload
            .get("delta")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        StreamEvent::new(kind, delta, payload)
    }
}
