#![cfg(all(feature = "provider-groq", feature = "provider-cerebras"))]

use std::sync::{Arc, Mutex};

use futures_util::stream;
use serde_json::json;
use sprovider::{
    BufferedResponse, ByteStream, ChatCompletionsConfig, ChatCompletionsProvider, ChatProvider,
    ErrorCategory, HttpMethod, HttpRequest, HttpTransport, MessageInput, ProviderError,
    ProviderErrorKind, ProviderFuture, ProviderStreamHooks, Role, StreamingResponse,
};

const GROQ_STREAM: &str = concat!(
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"}}]}\n\n",
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"}}]}\n\n",
    ": keep-alive\n",
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo, \"}}]}\n\n",
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"wörld\"}}]}\n\n",
    "data: {\"id\":\"c1\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
    "data: [DONE]\n\n",
);

#[derive(Debug)]
enum Script {
    Stream { status: u16, chunks: Vec<Vec<u8>> },
    Buffered { status: u16, body: String },
    ConnectError(String),
}

#[derive(Debug)]
struct FakeTransport {
    script: Script,
    captured: Mutex<Vec<HttpRequest>>,
}

impl FakeTransport {
    fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            captured: Mutex::new(Vec::new()),
        })
    }

    fn replaying(body: &str, chunk_size: usize) -> Arc<Self> {
        Self::new(Script::Stream {
            status: 200,
            chunks: body
                .as_bytes()
                .chunks(chunk_size)
                .map(<[u8]>::to_vec)
                .collect(),
        })
    }

    fn requests(&self) -> Vec<HttpRequest> {
        self.captured.lock().expect("capture lock").clone()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> ProviderFuture<'a, Result<BufferedResponse, ProviderError>> {
        Box::pin(async move {
            self.captured.lock().expect("capture lock").push(request);
            match &self.script {
                Script::Buffered { status, body } => Ok(BufferedResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Script::ConnectError(message) => Err(ProviderError::transport(message.clone())),
                Script::Stream { .. } => Err(ProviderError::transport("unexpected buffered call")),
            }
        })
    }

    fn stream<'a>(
        &'a self,
        request: HttpRequest,
    ) -> ProviderFuture<'a, Result<StreamingResponse<'a>, ProviderError>> {
        Box::pin(async move {
            self.captured.lock().expect("capture lock").push(request);
            match &self.script {
                Script::Stream { status, chunks } => {
                    let body = stream::iter(chunks.clone().into_iter().map(Ok));
                    Ok(StreamingResponse {
                        status: *status,
                        body: Box::pin(body) as ByteStream<'a>,
                    })
                }
                Script::ConnectError(message) => Err(ProviderError::transport(message.clone())),
                Script::Buffered { .. } => Err(ProviderError::transport("unexpected stream call")),
            }
        })
    }
}

fn hello() -> Vec<MessageInput> {
    vec![
        MessageInput::from((Role::System, "Be brief.")),
        MessageInput::from(("user", "Say hello")),
    ]
}

async fn collect(provider: &ChatCompletionsProvider) -> (Vec<String>, Result<(), ProviderError>) {
    let mut deltas = Vec::new();
    let mut sink = |delta: &str| deltas.push(delta.to_string());
    let result = provider.stream(hello(), &mut sink).await;
    (deltas, result)
}

#[tokio::test]
async fn stream_forwards_content_deltas_in_order() {
    let transport = FakeTransport::replaying(GROQ_STREAM, 4096);
    let provider = ChatCompletionsProvider::groq("gsk-test", transport.clone());

    let (deltas, result) = collect(&provider).await;

    result.expect("stream should succeed");
    assert_eq!(deltas, vec!["Hel", "lo, ", "wörld"]);
    assert_eq!(provider.name(), "groq");
}

#[tokio::test]
async fn stream_is_identical_under_any_fragmentation() {
    for chunk_size in [1, 2, 3, 7, 16, 61] {
        let provider =
            ChatCompletionsProvider::groq("gsk-test", FakeTransport::replaying(GROQ_STREAM, chunk_size));
        let (deltas, result) = collect(&provider).await;

        result.expect("stream should succeed");
        assert_eq!(deltas.concat(), "Hello, wörld", "chunk size {chunk_size}");
        assert_eq!(deltas.len(), 3, "chunk size {chunk_size}");
    }
}

#[tokio::test]
async fn stream_posts_chat_completions_body() {
    let transport = FakeTransport::replaying("data: [DONE]\n", 64);
    let config = ChatCompletionsConfig::groq("gsk-test")
        .with_base_url("https://groq.test/openai/v1/")
        .with_model("llama-3.3-70b-versatile")
        .with_stop("\n\n");
    let provider = ChatCompletionsProvider::new("groq", config, transport.clone());

    let (deltas, result) = collect(&provider).await;
    result.expect("stream should succeed");
    assert!(deltas.is_empty());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "https://groq.test/openai/v1/chat/completions");
    assert_eq!(request.api_key.expose(), "gsk-test");
    assert!(request.timeout.is_none());

    let body = request.body.clone().expect("json body");
    assert_eq!(body["model"], "llama-3.3-70b-versatile");
    assert_eq!(
        body["messages"],
        json!([
            {"role": "system", "content": "Be brief."},
            {"role": "user", "content": "Say hello"}
        ])
    );
    assert_eq!(body["max_completion_tokens"], 4096);
    assert_eq!(body["top_p"], 1.0);
    assert_eq!(body["stream"], true);
    assert_eq!(body["stop"], "\n\n");
    assert!(body.get("input").is_none());
    assert!(body.get("max_output_tokens").is_none());
}

#[tokio::test]
async fn stop_is_omitted_when_unset() {
    let transport = FakeTransport::replaying("data: [DONE]\n", 64);
    let provider = ChatCompletionsProvider::cerebras("csk-test", transport.clone());

    collect(&provider).await.1.expect("stream should succeed");

    let body = transport.requests()[0].body.clone().expect("json body");
    assert!(body.get("stop").is_none());
    assert_eq!(body["model"], "llama3.1-8b");
    assert_eq!(
        transport.requests()[0].url,
        "https://api.cerebras.ai/v1/chat/completions"
    );
    assert_eq!(provider.name(), "cerebras");
}

#[tokio::test]
async fn invalid_messages_fail_before_any_request() {
    let transport = FakeTransport::replaying(GROQ_STREAM, 64);
    let provider = ChatCompletionsProvider::groq("gsk-test", transport.clone());
    let mut deltas = Vec::new();
    let mut sink = |delta: &str| deltas.push(delta.to_string());

    let missing_content = vec![MessageInput::loose(Some("user".into()), None)];
    let error = provider
        .stream(missing_content, &mut sink)
        .await
        .expect_err("missing content should fail");
    assert_eq!(error.kind(), ProviderErrorKind::InvalidInput);

    let unknown_role = vec![MessageInput::from(("narrator", "Once upon a time"))];
    let error = provider
        .stream(unknown_role, &mut sink)
        .await
        .expect_err("unknown role should fail");
    assert_eq!(error.kind(), ProviderErrorKind::InvalidInput);

    assert!(deltas.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn blank_key_is_a_configuration_error() {
    let transport = FakeTransport::replaying(GROQ_STREAM, 64);
    let provider = ChatCompletionsProvider::groq("", transport.clone());

    let (deltas, result) = collect(&provider).await;

    assert_eq!(
        result.expect_err("blank key should fail").kind(),
        ProviderErrorKind::Configuration
    );
    assert!(deltas.is_empty());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn connection_failure_is_passed_through_as_transport() {
    let transport = FakeTransport::new(Script::ConnectError("connection refused".to_string()));
    let provider = ChatCompletionsProvider::groq("gsk-test", transport);

    let (deltas, result) = collect(&provider).await;

    assert_eq!(
        result.expect_err("connect should fail"),
        ProviderError::transport("connection refused")
    );
    assert!(deltas.is_empty());
}

#[tokio::test]
async fn server_error_without_payload_is_http() {
    let transport = FakeTransport::new(Script::Stream {
        status: 503,
        chunks: vec![b"upstream unavailable".to_vec()],
    });
    let provider = ChatCompletionsProvider::groq("gsk-test", transport);

    let (deltas, result) = collect(&provider).await;

    let error = result.expect_err("503 should fail");
    assert_eq!(error.kind(), ProviderErrorKind::Http);
    assert_eq!(error.status(), Some(503));
    assert!(deltas.is_empty());
}

#[tokio::test]
async fn rate_limit_payload_is_classified() {
    let body = r#"{"error":{"message":"Rate limit reached for model","type":"tokens","code":"rate_limit_exceeded"}}"#;
    let transport = FakeTransport::new(Script::Stream {
        status: 429,
        chunks: vec![body.as_bytes().to_vec()],
    });
    let provider = ChatCompletionsProvider::groq("gsk-test", transport);

    let (_, result) = collect(&provider).await;

    let error = result.expect_err("429 should fail");
    assert_eq!(error.kind(), ProviderErrorKind::Service);
    assert_eq!(error.category(), Some(ErrorCategory::RateLimit));
}

#[tokio::test]
async fn complete_returns_whole_message_with_timeout() {
    let transport = FakeTransport::new(Script::Buffered {
        status: 200,
        body: json!({
            "id": "chatcmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hello!"}}]
        })
        .to_string(),
    });
    let provider = ChatCompletionsProvider::groq("gsk-test", transport.clone());

    let reply = provider.complete(hello()).await.expect("complete should succeed");

    assert_eq!(reply, "Hello!");
    let request = &transport.requests()[0];
    assert_eq!(request.timeout, Some(std::time::Duration::from_secs(60)));
    assert_eq!(request.body.as_ref().expect("json body")["stream"], false);
}

#[tokio::test]
async fn complete_surfaces_error_message() {
    let transport = FakeTransport::new(Script::Buffered {
        status: 401,
        body: r#"{"error":{"message":"Invalid API Key","type":"invalid_request_error","code":"invalid_api_key"}}"#
            .to_string(),
    });
    let provider = ChatCompletionsProvider::groq("gsk-bad", transport);

    let error = provider.complete(hello()).await.expect_err("401 should fail");
    let service = error.as_service().expect("classified error");

    assert!(service.is_auth());
    assert_eq!(service.message(), "Invalid API Key");
}

#[tokio::test]
async fn complete_rejects_non_json_body() {
    let transport = FakeTransport::new(Script::Buffered {
        status: 200,
        body: "<html>maintenance</html>".to_string(),
    });
    let provider = ChatCompletionsProvider::groq("gsk-test", transport);

    let error = provider.complete(hello()).await.expect_err("html should fail");
    assert_eq!(error.kind(), ProviderErrorKind::Http);
}

#[derive(Debug, Default)]
struct RecordingHooks {
    events: Mutex<Vec<String>>,
}

impl ProviderStreamHooks for RecordingHooks {
    fn on_stream_start(&self, provider: &str, model: &str) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("start:{provider}:{model}"));
    }

    fn on_stream_success(&self, provider: &str, deltas: usize, _elapsed: std::time::Duration) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("success:{provider}:{deltas}"));
    }

    fn on_stream_failure(
        &self,
        provider: &str,
        error: &ProviderError,
        _elapsed: std::time::Duration,
    ) {
        self.events
            .lock()
            .expect("events lock")
            .push(format!("failure:{provider}:{:?}", error.kind()));
    }
}

#[tokio::test]
async fn hooks_observe_stream_lifecycle() {
    let hooks = Arc::new(RecordingHooks::default());
    let provider = ChatCompletionsProvider::groq("gsk-test", FakeTransport::replaying(GROQ_STREAM, 5))
        .with_hooks(hooks.clone());
    collect(&provider).await.1.expect("stream should succeed");

    let failing = ChatCompletionsProvider::groq(
        "gsk-test",
        FakeTransport::new(Script::ConnectError("reset".to_string())),
    )
    .with_hooks(hooks.clone());
    let _ = collect(&failing).await;

    let events = hooks.events.lock().expect("events lock").clone();
    assert_eq!(
        events,
        vec![
            "start:groq:moonshotai/kimi-k2-instruct-0905",
            "success:groq:3",
            "start:groq:moonshotai/kimi-k2-instruct-0905",
            "failure:groq:Transport",
        ]
    );
}
