//! Unified facade over the switchyard workspace crates.
//!
//! A [`Gateway`] owns one adapter per configured backend, picks the next one
//! from a rotation shared by every process on the host and streams the reply
//! through it.
//!
//! ```rust,no_run
//! use switchyard::{Gateway, GatewayConfig, describe_failure, sy_messages};
//!
//! # async fn run() -> Result<(), switchyard::GatewayError> {
//! let gateway = Gateway::from_config(&GatewayConfig::from_env()?)?;
//! let mut print = |delta: &str| print!("{delta}");
//!
//! match gateway
//!     .stream_next(sy_messages![user => "Give me five API ideas."], &mut print)
//!     .await
//! {
//!     Ok(provider) => println!("\n[done via {provider}]"),
//!     Err(error) => println!("\n{}", describe_failure(&error)),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod gateway;
mod macros;
mod providers;

pub mod prelude;
pub mod util;

pub use scommon;
pub use sobserve;
pub use sprovider;
pub use srotator;

pub use config::{
    CEREBRAS_API_KEY, CEREBRAS_BASE_URL, CEREBRAS_MODEL, GROQ_API_KEY, GROQ_BASE_URL, GROQ_MODEL,
    GatewayConfig, OPENAI_API_KEY, OPENAI_BASE_URL, OPENAI_MODEL, STATE_FILE,
};
pub use error::{GatewayError, GatewayErrorKind};
pub use gateway::Gateway;
pub use providers::{build_providers, default_transport};

pub use scommon::{BoxFuture, GenerationOptions};
pub use sobserve::{
    MetricsObservabilityHooks, SafeRotationHooks, SafeStreamHooks, TracingObservabilityHooks,
};
pub use sprovider::{
    ChatCompletionsConfig, ChatCompletionsProvider, ChatMessage, ChatProvider, DeltaSink,
    ErrorCategory, EventStreamParser, HttpTransport, MessageInput, NoopStreamHooks,
    OpenAiProvider, ProviderError, ProviderErrorKind, ProviderStreamHooks, ReqwestTransport,
    ResponsesConfig, Role, SecretString, ServiceError, normalize_messages,
};
pub use srotator::{
    CounterStore, FileCounterStore, InMemoryCounterStore, NoopRotationHooks, RotationHooks,
    Rotator, RotatorError, RotatorErrorKind,
};

pub use util::{assistant_message, describe_failure, system_message, user_message};

#[cfg(test)]
mod tests {
    use crate::{MessageInput, Role};

    #[test]
    fn sy_msg_macro_creates_expected_message() {
        let message = crate::sy_msg!(user => "hello");
        assert_eq!(message.role(), Role::User);
        assert_eq!(message.content(), "hello");
    }

    #[test]
    fn sy_messages_macro_builds_input_vector() {
        let messages = crate::sy_messages![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(messages.len(), 2);
        let normalized = crate::normalize_messages(messages).expect("well formed");
        assert_eq!(normalized[0].role(), Role::System);
        assert_eq!(normalized[1].role(), Role::User);

        assert!(crate::sy_messages![].is_empty());
        let _: Vec<MessageInput> = crate::sy_messages![];
    }
}
