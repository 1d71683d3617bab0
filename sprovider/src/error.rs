//! Provider error kinds and error value helpers.
//!
//! ```rust
//! use sprovider::{ProviderError, ProviderErrorKind, ServiceError};
//!
//! let transport = ProviderError::transport("connection reset by peer");
//! assert_eq!(transport.kind(), ProviderErrorKind::Transport);
//!
//! let service = ProviderError::from(ServiceError::new("openai", 401, "bad key"));
//! assert!(service.as_service().is_some_and(ServiceError::is_auth));
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::classify::{ErrorCategory, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    InvalidInput,
    Configuration,
    Transport,
    Http,
    Service,
}

/// Failure of a single provider call.
///
/// Nothing here is retried by the adapters; callers decide whether to fail
/// over based on [`ProviderError::kind`] or the classified [`ServiceError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Malformed message list, rejected before any network call.
    InvalidInput(String),
    /// Adapter is missing something it needs, such as its credential.
    Configuration(String),
    /// Connection-level failure, message passed through verbatim.
    Transport(String),
    /// HTTP rejection without a structured error payload.
    Http { provider: String, status: u16 },
    Service(ServiceError),
}

impl ProviderError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn http(provider: impl Into<String>, status: u16) -> Self {
        Self::Http {
            provider: provider.into(),
            status,
        }
    }

    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            Self::InvalidInput(_) => ProviderErrorKind::InvalidInput,
            Self::Configuration(_) => ProviderErrorKind::Configuration,
            Self::Transport(_) => ProviderErrorKind::Transport,
            Self::Http { .. } => ProviderErrorKind::Http,
            Self::Service(_) => ProviderErrorKind::Service,
        }
    }

    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(error) => Some(error),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.as_service().map(ServiceError::category)
    }

    /// HTTP status when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Service(error) => Some(error.http_status()),
            _ => None,
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(message)
            | Self::Configuration(message)
            | Self::Transport(message) => write!(f, "{:?}: {}", self.kind(), message),
            Self::Http { provider, status } => {
                write!(f, "Http: {provider} streaming request failed with status {status}")
            }
            Self::Service(error) => write!(f, "Service: {error}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(error) => Some(error),
            _ => None,
        }
    }
}

impl From<ServiceError> for ProviderError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}
