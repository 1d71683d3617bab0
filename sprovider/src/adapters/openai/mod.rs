//! OpenAI Responses API adapter.

mod provider;
mod serde_api;

pub use provider::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, OPENAI_PROVIDER_NAME, OpenAiProvider, ResponsesConfig,
    ResponsesDialect,
};
