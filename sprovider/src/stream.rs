//! Stream events and the shared loop that turns a response body into deltas.
//!
//! Every backend speaks `data: {json}` lines; they differ only in where the
//! text lives inside the JSON and in how failures are signalled. A
//! [`StreamDialect`] captures that difference and everything else is shared.

use std::time::Instant;

use futures_util::StreamExt;
use serde_json::Value;

use crate::transport::{ByteStream, HttpRequest, HttpTransport, StreamingResponse};
use crate::{DeltaSink, EventStreamParser, ProviderError, ProviderStreamHooks, ServiceError};

const ERROR_BODY_LIMIT: usize = 16 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamEventKind {
    TextDelta,
    /// The model declined; the text is still forwarded to the caller.
    RefusalDelta,
    /// Terminal in-band failure on an otherwise accepted stream.
    Failed,
    Other,
}

/// One decoded payload, alive only for a single parse cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamEvent {
    pub kind: StreamEventKind,
    pub delta: String,
    pub raw: Value,
}

impl StreamEvent {
    pub fn new(kind: StreamEventKind, delta: impl Into<String>, raw: Value) -> Self {
        Self {
            kind,
            delta: delta.into(),
            raw,
        }
    }

    pub fn other(raw: Value) -> Self {
        Self::new(StreamEventKind::Other, String::new(), raw)
    }
}

pub trait StreamDialect: Send + Sync {
    fn decode(&self, payload: Value) -> StreamEvent;

    /// Builds the classified error for an event decoded as
    /// [`StreamEventKind::Failed`].
    fn failure(&self, provider: &str, status: u16, event: &StreamEvent) -> ServiceError {
        service_error_from_value(provider, status, &event.raw)
            .unwrap_or_else(|| ServiceError::new(provider, status, "stream reported a failure"))
    }
}

pub(crate) struct StreamCall<'a> {
    pub provider: &'a str,
    pub model: &'a str,
    pub transport: &'a dyn HttpTransport,
    pub dialect: &'a dyn StreamDialect,
    pub hooks: &'a dyn ProviderStreamHooks,
}

pub(crate) async fn run_stream(
    call: StreamCall<'_>,
    request: HttpRequest,
    on_delta: DeltaSink<'_>,
) -> Result<(), ProviderError> {
    let started = Instant::now();
    call.hooks.on_stream_start(call.provider, call.model);

    let result = match call.transport.stream(request).await {
        Ok(response) => forward_deltas(call.provider, call.dialect, response, on_delta).await,
        Err(error) => Err(error),
    };

    match &result {
        Ok(deltas) => call
            .hooks
            .on_stream_success(call.provider, *deltas, started.elapsed()),
        Err(error) => call
            .hooks
            .on_stream_failure(call.provider, error, started.elapsed()),
    }

    result.map(|_| ())
}

/// Feeds the body through an [`EventStreamParser`] and forwards non-empty
/// deltas. Returns how many deltas were forwarded.
pub(crate) async fn forward_deltas(
    provider: &str,
    dialect: &dyn StreamDialect,
    response: StreamingResponse<'_>,
    on_delta: DeltaSink<'_>,
) -> Result<usize, ProviderError> {
    let StreamingResponse { status, mut body } = response;

    if status >= 400 {
        let body = collect_error_body(&mut body).await;
        return Err(rejection_error(provider, status, &body));
    }

    let mut parser = EventStreamParser::new();
    let mut deltas = 0;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;

        for payload in parser.feed(&chunk) {
            let event = dialect.decode(payload);
            match event.kind {
                StreamEventKind::TextDelta | StreamEventKind::RefusalDelta => {
                    if !event.delta.is_empty() {
                        on_delta(&event.delta);
                        deltas += 1;
                    }
                }
                StreamEventKind::Failed => {
                    let error = dialect.failure(provider, status, &event);
                    tracing::warn!(
                        provider,
                        status,
                        error_code = error.error_code(),
                        category = %error.category(),
                        "stream reported an in-band failure"
                    );
                    return Err(error.into());
                }
                StreamEventKind::Other => {}
            }
        }
    }

    if let Some(rest) = parser.finish() {
        tracing::debug!(
            provider,
            discarded_bytes = rest.len(),
            "dropping unterminated trailing event-stream line"
        );
    }

    Ok(deltas)
}

/// Maps a rejected response to `Service` when the body carries an
/// `{"error": {...}}` object and to a bare `Http` error otherwise.
pub(crate) fn rejection_error(provider: &str, status: u16, body: &str) -> ProviderError {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| service_error_from_value(provider, status, &value))
        .map(ProviderError::from)
        .unwrap_or_else(|| ProviderError::http(provider, status))
}

/// Reads an error object from `error` or `response.error`.
pub(crate) fn service_error_from_value(
    provider: &str,
    status: u16,
    value: &Value,
) -> Option<ServiceError> {
    let error = value
        .get("error")
        .filter(|error| error.is_object())
        .or_else(|| {
            value
                .pointer("/response/error")
                .filter(|error| error.is_object())
        })?;

    let message = error
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("{provider} request failed with status {status}"));

    let mut service = ServiceError::new(provider, status, message);
    if let Some(code) = error.get("code").and_then(scalar_text) {
        service = service.with_error_code(code);
    }
    if let Some(error_type) = error
        .get("type")
        .and_then(scalar_text)
        .or_else(|| value.get("type").and_then(scalar_text))
    {
        service = service.with_error_type(error_type);
    }

    Some(service)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

async fn collect_error_body(body: &mut ByteStream<'_>) -> String {
    let mut collected = Vec::new();
    while let Some(Ok(chunk)) = body.next().await {
        collected.extend_from_slice(&chunk);
        if collected.len() >= ERROR_BODY_LIMIT {
            collected.truncate(ERROR_BODY_LIMIT);
            break;
        }
    }

    String::from_utf8_lossy(&collected).into_owned()
}
