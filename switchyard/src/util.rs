//! Small convenience constructors and failure formatting.

use sprovider::{ChatMessage, Role};

use crate::GatewayError;

pub fn system_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> ChatMessage {
    ChatMessage::new(Role::Assistant, content)
}

/// One-line summary suitable for an end client: the failing provider and the
/// category description when the failure was classified, otherwise the raw
/// message.
pub fn describe_failure(error: &GatewayError) -> String {
    match (&error.provider, error.category()) {
        (Some(provider), Some(category)) => {
            format!("[error in {provider}] {}", category.description())
        }
        (Some(provider), None) => format!("[error in {provider}] {}", error.message),
        (None, _) => format!("[error] {}", error.message),
    }
}

#[cfg(test)]
mod tests {
    use sprovider::{ProviderError, Role, ServiceError};

    use super::{describe_failure, system_message, user_message};
    use crate::GatewayError;

    #[test]
    fn message_helpers_set_roles() {
        assert_eq!(user_message("hi").role(), Role::User);
        assert_eq!(system_message("be brief").content(), "be brief");
    }

    #[test]
    fn describe_failure_prefers_category_description() {
        let quota = GatewayError::provider(
            "openai",
            ServiceError::new("openai", 200, "You exceeded your current quota")
                .with_error_code("insufficient_quota")
                .into(),
        );
        assert_eq!(describe_failure(&quota), "[error in openai] quota limit reached");

        let unknown = GatewayError::provider(
            "groq",
            ServiceError::new("groq", 500, "internal").into(),
        );
        assert_eq!(describe_failure(&unknown), "[error in groq] unknown");

        let transport =
            GatewayError::provider("cerebras", ProviderError::transport("connection refused"));
        assert_eq!(
            describe_failure(&transport),
            "[error in cerebras] Transport: connection refused"
        );

        let rotation = GatewayError::rotation("permission denied");
        assert_eq!(describe_failure(&rotation), "[error] permission denied");
    }
}
