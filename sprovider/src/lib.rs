//! Streaming chat adapters with a shared event-stream parser and a single
//! failure taxonomy.
//!
//! Every backend implements [`ChatProvider`]: it takes a message list, issues
//! one streaming request and forwards each text fragment to a caller-supplied
//! sink. Failures come back as [`ProviderError`], with backend error payloads
//! classified through [`ServiceError::category`].
//!
//! ```rust
//! use sprovider::{ErrorCategory, ProviderError, ServiceError};
//!
//! let error = ProviderError::from(
//!     ServiceError::new("groq", 429, "Rate limit reached").with_error_type("tokens"),
//! );
//! assert_eq!(error.category(), Some(ErrorCategory::RateLimit));
//! ```

pub mod adapters;
pub mod prelude;

mod classify;
mod error;
mod hooks;
mod model;
mod provider;
mod secret;
mod sse;
mod stream;
mod transport;

pub use classify::{ErrorCategory, MODEL_NOT_FOUND, QUOTA_EXHAUSTED, ServiceError};
pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopStreamHooks, ProviderStreamHooks};
pub use model::{ChatMessage, MessageInput, Role, RoleInput, normalize_messages};
pub use provider::{ChatProvider, DeltaSink, ProviderFuture};
pub use scommon::GenerationOptions;
pub use secret::SecretString;
pub use sse::{DATA_PREFIX, DONE_SENTINEL, EventStreamParser};
pub use stream::{StreamDialect, StreamEvent, StreamEventKind};
#[cfg(feature = "http-transport")]
pub use transport::ReqwestTransport;
pub use transport::{
    BufferedResponse, ByteStream, HttpMethod, HttpRequest, HttpTransport, StreamingResponse,
};

#[cfg(feature = "provider-openai")]
pub use adapters::openai::{OpenAiProvider, ResponsesConfig};

#[cfg(any(feature = "provider-groq", feature = "provider-cerebras"))]
pub use adapters::chat_completions::{
    ChatCompletionsConfig, ChatCompletionsProvider, StopSequences,
};
