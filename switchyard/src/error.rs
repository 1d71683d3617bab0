//! Gateway-level errors wrapping rotation and provider failures.

use std::error::Error;
use std::fmt::{Display, Formatter};

use sprovider::{ErrorCategory, ProviderError};
use srotator::{RotatorError, RotatorErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayErrorKind {
    Configuration,
    Rotation,
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub message: String,
    /// Name of the provider that failed, when one had been selected.
    pub provider: Option<String>,
    pub provider_error: Option<ProviderError>,
}

impl GatewayError {
    pub fn new(kind: GatewayErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            provider: None,
            provider_error: None,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Configuration, message)
    }

    pub fn rotation(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorKind::Rotation, message)
    }

    pub fn provider(provider: impl Into<String>, error: ProviderError) -> Self {
        Self {
            kind: GatewayErrorKind::Provider,
            message: error.to_string(),
            provider: Some(provider.into()),
            provider_error: Some(error),
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        self.provider_error.as_ref().and_then(ProviderError::category)
    }
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.provider {
            Some(provider) => write!(f, "{:?} ({provider}): {}", self.kind, self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.provider_error
            .as_ref()
            .map(|error| error as &(dyn Error + 'static))
    }
}

impl From<RotatorError> for GatewayError {
    fn from(value: RotatorError) -> Self {
        match value.kind {
            RotatorErrorKind::Configuration => Self::configuration(value.message),
            RotatorErrorKind::StateUnavailable => Self::rotation(value.message),
        }
    }
}

impl From<ProviderError> for GatewayError {
    fn from(value: ProviderError) -> Self {
        let provider = match &value {
            ProviderError::Http { provider, .. } => Some(provider.clone()),
            ProviderError::Service(service) => Some(service.provider().to_string()),
            _ => None,
        };

        Self {
            kind: GatewayErrorKind::Provider,
            message: value.to_string(),
            provider,
            provider_error: Some(value),
        }
    }
}
