//! Common `sprovider` imports for downstream crates.

pub use crate::{
    ChatMessage, ChatProvider, DeltaSink, ErrorCategory, GenerationOptions, HttpTransport,
    MessageInput, NoopStreamHooks, ProviderError, ProviderErrorKind, ProviderStreamHooks, Role,
    SecretString, ServiceError,
};

#[cfg(feature = "http-transport")]
pub use crate::ReqwestTransport;

#[cfg(feature = "provider-openai")]
pub use crate::{OpenAiProvider, ResponsesConfig};

#[cfg(any(feature = "provider-groq", feature = "provider-cerebras"))]
pub use crate::{ChatCompletionsConfig, ChatCompletionsProvider};
