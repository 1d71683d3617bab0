//! Chat message model and loose-input normalization.
//!
//! ```rust
//! use sprovider::{ChatMessage, MessageInput, Role, normalize_messages};
//!
//! let messages = normalize_messages(vec![
//!     MessageInput::from(ChatMessage::new(Role::System, "Be brief.")),
//!     MessageInput::from(("user", "hello")),
//! ])
//! .expect("messages are well formed");
//!
//! assert_eq!(messages[1].role(), Role::User);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProviderError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "assistant" => Ok(Self::Assistant),
            "system" => Ok(Self::System),
            other => Err(ProviderError::invalid_input(format!(
                "unsupported message role '{other}'"
            ))),
        }
    }
}

/// One chat turn. Serializes to the `{role, content}` shape every backend accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleInput {
    Known(Role),
    Raw(String),
}

impl From<Role> for RoleInput {
    fn from(value: Role) -> Self {
        Self::Known(value)
    }
}

impl From<&str> for RoleInput {
    fn from(value: &str) -> Self {
        Self::Raw(value.to_string())
    }
}

impl From<String> for RoleInput {
    fn from(value: String) -> Self {
        Self::Raw(value)
    }
}

/// A message as handed to an adapter: either already typed, or a loose
/// role/content pair where either half may be missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageInput {
    Message(ChatMessage),
    Loose {
        role: Option<RoleInput>,
        content: Option<String>,
    },
}

impl MessageInput {
    pub fn loose(role: Option<RoleInput>, content: Option<String>) -> Self {
        Self::Loose { role, content }
    }

    pub fn into_message(self) -> Result<ChatMessage, ProviderError> {
        match self {
            Self::Message(message) => Ok(message),
            Self::Loose {
                role: Some(role),
                content: Some(content),
            } => {
                let role = match role {
                    RoleInput::Known(role) => role,
                    RoleInput::Raw(raw) => raw.parse()?,
                };
                Ok(ChatMessage::new(role, content))
            }
            Self::Loose { .. } => Err(ProviderError::invalid_input(
                "message must carry both role and content",
            )),
        }
    }
}

impl From<ChatMessage> for MessageInput {
    fn from(value: ChatMessage) -> Self {
        Self::Message(value)
    }
}

impl<R, C> From<(R, C)> for MessageInput
where
    R: Into<RoleInput>,
    C: Into<String>,
{
    fn from((role, content): (R, C)) -> Self {
        Self::loose(Some(role.into()), Some(content.into()))
    }
}

impl From<Value> for MessageInput {
    fn from(value: Value) -> Self {
        let role = value
            .get("role")
            .and_then(Value::as_str)
            .map(RoleInput::from);
        let content = match value.get("content") {
            None | Some(Value::Null) => None,
            Some(Value::String(text)) => Some(text.clone()),
            Some(Value::Bool(flag)) => Some(flag.to_string()),
            Some(Value::Number(number)) => Some(number.to_string()),
            Some(_) => None,
        };
        Self::loose(role, content)
    }
}

/// Converts every input into a [`ChatMessage`], failing on the first
/// malformed entry.
pub fn normalize_messages<I>(messages: I) -> Result<Vec<ChatMessage>, ProviderError>
where
    I: IntoIterator,
    I::Item: Into<MessageInput>,
{
    messages
        .into_iter()
        .map(|message| message.into().into_message())
        .collect()
}
