//! Common imports for most switchyard applications.

pub use crate::{
    ChatMessage, ChatProvider, ErrorCategory, Gateway, GatewayConfig, GatewayError,
    GatewayErrorKind, MessageInput, ProviderError, ProviderErrorKind, Role, ServiceError,
};
pub use crate::{assistant_message, describe_failure, system_message, user_message};
pub use crate::{sy_messages, sy_msg};
