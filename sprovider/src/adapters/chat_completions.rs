//! Adapter for backends speaking the `/chat/completions` streaming format.
//!
//! Groq and Cerebras both expose this wire format; see their modules for the
//! preconfigured constructors.

use std::sync::Arc;
use std::time::Duration;

use scommon::GenerationOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::stream::{
    StreamCall, StreamDialect, StreamEvent, StreamEventKind, rejection_error, run_stream,
};
use crate::transport::{HttpRequest, HttpTransport, endpoint};
use crate::{
    ChatMessage, ChatProvider, DeltaSink, MessageInput, NoopStreamHooks, ProviderError,
    ProviderFuture, ProviderStreamHooks, SecretString, normalize_messages,
};

const COMPLETE_TIMEOUT: Duration = Duration::from_secs(60);

/// One stop sequence or several; serialized as a string or an array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StopSequences {
    One(String),
    Many(Vec<String>),
}

impl From<&str> for StopSequences {
    fn from(value: &str) -> Self {
        Self::One(value.to_string())
    }
}

impl From<Vec<String>> for StopSequences {
    fn from(value: Vec<String>) -> Self {
        Self::Many(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatCompletionsConfig {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub options: GenerationOptions,
    pub stop: Option<StopSequences>,
}

impl ChatCompletionsConfig {
    pub fn new(
        api_key: impl Into<SecretString>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            options: GenerationOptions::default(),
            stop: None,
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

    pub fn with_stop(mut self, stop: impl Into<StopSequences>) -> Self {
        self.stop = Some(stop.into());
        self
    }
}

#[derive(Clone)]
pub struct ChatCompletionsProvider {
    name: String,
    config: ChatCompletionsConfig,
    transport: Arc<dyn HttpTransport>,
    hooks: Arc<dyn ProviderStreamHooks>,
}

impl ChatCompletionsProvider {
    pub fn new(
        name: impl Into<String>,
        config: ChatCompletionsConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            transport,
            hooks: Arc::new(NoopStreamHooks),
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ProviderStreamHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn config(&self) -> &ChatCompletionsConfig {
        &self.config
    }

    /// Non-streaming call returning the whole assistant reply.
    pub async fn complete(&self, messages: Vec<MessageInput>) -> Result<String, ProviderError> {
        let request = self.prepare(messages, false)?.with_timeout(COMPLETE_TIMEOUT);
        let response = self.transport.send(request).await?;

        if response.status >= 400 {
            return Err(rejection_error(&self.name, response.status, &response.body));
        }

        let parsed = serde_json::from_str::<CompletionResponse>(&response.body)
            .map_err(|_| ProviderError::http(&self.name, response.status))?;

        Ok(parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }

    fn prepare(
        &self,
        messages: Vec<MessageInput>,
        stream: bool,
    ) -> Result<HttpRequest, ProviderError> {
        if self.config.api_key.is_empty() {
            return Err(ProviderError::configuration(format!(
                "no {} API key configured",
                self.name
            )));
        }

        self.config
            .options
            .validate()
            .map_err(ProviderError::invalid_input)?;

        let messages = normalize_messages(messages)?;
        let body = self.build_body(messages, stream)?;

        Ok(HttpRequest::post(
            endpoint(&self.config.base_url, "chat/completions"),
            self.config.api_key.clone(),
            body,
        ))
    }

    fn build_body(&self, messages: Vec<ChatMessage>, stream: bool) -> Result<Value, ProviderError> {
        let request = ChatCompletionsRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.options.temperature,
            max_completion_tokens: self.config.options.max_tokens,
            top_p: self.config.options.top_p,
            stream,
            stop: self.config.stop.as_ref(),
        };

        serde_json::to_value(request).map_err(|err| ProviderError::invalid_input(err.to_string()))
    }
}

impl std::fmt::Debug for ChatCompletionsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsProvider")
            .field("name", &self.name)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ChatProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn stream<'a>(
        &'a self,
        messages: Vec<MessageInput>,
        on_delta: DeltaSink<'a>,
    ) -> ProviderFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            let request = self.prepare(messages, true)?;
            let call = StreamCall {
                provider: &self.name,
                model: &self.config.model,
                transport: self.transport.as_ref(),
                dialect: &ChatCompletionsDialect,
                hooks: self.hooks.as_ref(),
            };

            run_stream(call, request, on_delta).await
        })
    }
}

/// Text lives at `choices[0].delta.content`; there is no type tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatCompletionsDialect;

impl StreamDialect for ChatCompletionsDialect {
    fn decode(&self, payload: Value) -> StreamEvent {
        let delta = payload
            .pointer("/choices/0/delta/content")
            .and_then(Value::as_str)
            .map(str::to_string);

        match delta {
            Some(delta) => StreamEvent::new(StreamEventKind::TextDelta, delta, payload),
            None => StreamEvent::other(payload),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_completion_tokens: u32,
    top_p: f32,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stop: Option<&'a StopSequences>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}
