//! HTTP transport seam and the reqwest-based implementation.
//!
//! Adapters only build [`HttpRequest`] values and read status plus body
//! bytes back, so tests can replay scripted chunk sequences through a fake
//! transport without opening sockets.

use std::pin::Pin;
use std::time::Duration;

use futures_core::Stream;
use serde_json::Value;

use crate::{ProviderError, ProviderFuture, SecretString};

pub type ByteStream<'a> = Pin<Box<dyn Stream<Item = Result<Vec<u8>, ProviderError>> + Send + 'a>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// A bearer-authenticated JSON request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub api_key: SecretString,
    pub body: Option<Value>,
    /// `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn post(url: impl Into<String>, api_key: SecretString, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            url: url.into(),
            api_key,
            body: Some(body),
            timeout: None,
        }
    }

    pub fn get(url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            method: HttpMethod::Get,
            url: url.into(),
            api_key,
            body: None,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Fully read response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BufferedResponse {
    pub status: u16,
    pub body: String,
}

/// Response whose body is still arriving.
pub struct StreamingResponse<'a> {
    pub status: u16,
    pub body: ByteStream<'a>,
}

impl std::fmt::Debug for StreamingResponse<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamingResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

pub trait HttpTransport: Send + Sync + std::fmt::Debug {
    /// Sends the request and reads the whole body.
    fn send<'a>(
        &'a self,
        request: HttpRequest,
    ) -> ProviderFuture<'a, Result<BufferedResponse, ProviderError>>;

    /// Sends the request and returns as soon as the status line is known.
    fn stream<'a>(
        &'a self,
        request: HttpRequest,
    ) -> ProviderFuture<'a, Result<StreamingResponse<'a>, ProviderError>>;
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path)
}

#[cfg(feature = "http-transport")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "http-transport")]
mod reqwest_transport {
    use futures_util::StreamExt;
    use reqwest::{Client, RequestBuilder};

    use super::{
        BufferedResponse, ByteStream, HttpMethod, HttpRequest, HttpTransport, StreamingResponse,
    };
    use crate::{ProviderError, ProviderFuture};

    /// Transport over a shared [`reqwest::Client`].
    ///
    /// The default client has no overall timeout, which keeps long streams
    /// open until the server finishes or the caller drops the future.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new(client: Client) -> Self {
            Self { client }
        }

        fn build(&self, request: HttpRequest) -> RequestBuilder {
            let builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };
            let mut builder = builder.bearer_auth(request.api_key.expose());

            if let Some(body) = &request.body {
                builder = builder.json(body);
            }

            if let Some(timeout) = request.timeout {
                builder = builder.timeout(timeout);
            }

            builder
        }
    }

    impl HttpTransport for ReqwestTransport {
        fn send<'a>(
            &'a self,
            request: HttpRequest,
        ) -> ProviderFuture<'a, Result<BufferedResponse, ProviderError>> {
            Box::pin(async move {
                let response = self
                    .build(request)
                    .send()
                    .await
                    .map_err(|err| ProviderError::transport(err.to_string()))?;
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|err| ProviderError::transport(err.to_string()))?;

                Ok(BufferedResponse { status, body })
            })
        }

        fn stream<'a>(
            &'a self,
            request: HttpRequest,
        ) -> ProviderFuture<'a, Result<StreamingResponse<'a>, ProviderError>> {
            Box::pin(async move {
                let response = self
                    .build(request)
                    .send()
                    .await
                    .map_err(|err| ProviderError::transport(err.to_string()))?;
                let status = response.status().as_u16();
                let body = response.bytes_stream().map(|item| {
                    item.map(|bytes| bytes.to_vec())
                        .map_err(|err| ProviderError::transport(err.to_string()))
                });

                Ok(StreamingResponse {
                    status,
                    body: Box::pin(body) as ByteStream<'a>,
                })
            })
        }
    }
}
