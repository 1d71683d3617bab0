//! Classified backend failures and their stable categories.
//!
//! ```rust
//! use sprovider::{ErrorCategory, ServiceError};
//!
//! let error = ServiceError::new("openai", 429, "You exceeded your current quota")
//!     .with_error_code("insufficient_quota");
//!
//! assert!(error.is_quota());
//! assert!(!error.is_rate_limit());
//! assert_eq!(error.category(), ErrorCategory::Quota);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Code/type reported when an account has run out of credit.
pub const QUOTA_EXHAUSTED: &str = "insufficient_quota";

/// Code/type reported when the requested model does not exist.
pub const MODEL_NOT_FOUND: &str = "model_not_found";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Quota,
    ModelNotFound,
    RateLimit,
    Auth,
    Unknown,
}

impl ErrorCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quota => "quota",
            Self::ModelNotFound => "model_not_found",
            Self::RateLimit => "rate_limit",
            Self::Auth => "auth",
            Self::Unknown => "unknown",
        }
    }

    /// Short end-user facing description of the failure.
    pub fn description(self) -> &'static str {
        match self {
            Self::Quota => "quota limit reached",
            Self::ModelNotFound => "model unavailable",
            Self::RateLimit => "rate limit reached",
            Self::Auth => "authentication error",
            Self::Unknown => "unknown",
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A backend failure normalized into one shape.
///
/// The category is derived from the raw fields each time it is asked for;
/// nothing is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    provider: String,
    http_status: u16,
    error_code: Option<String>,
    error_type: Option<String>,
    message: String,
}

impl ServiceError {
    pub fn new(provider: impl Into<String>, http_status: u16, message: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            http_status,
            error_code: None,
            error_type: None,
            message: message.into(),
        }
    }

    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn http_status(&self) -> u16 {
        self.http_status
    }

    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    pub fn error_type(&self) -> Option<&str> {
        self.error_type.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_quota(&self) -> bool {
        self.code_or_type_is(QUOTA_EXHAUSTED)
    }

    /// Only meaningful on an accepted (200) stream: the backend reports the
    /// bad model inside the event payload rather than through the status.
    pub fn is_model_not_found(&self) -> bool {
        self.http_status == 200 && self.code_or_type_is(MODEL_NOT_FOUND)
    }

    /// Quota exhaustion can also arrive with status 429 and takes precedence.
    pub fn is_rate_limit(&self) -> bool {
        self.http_status == 429 && !self.is_quota()
    }

    pub fn is_auth(&self) -> bool {
        self.http_status == 401
    }

    pub fn category(&self) -> ErrorCategory {
        if self.is_quota() {
            ErrorCategory::Quota
        } else if self.is_model_not_found() {
            ErrorCategory::ModelNotFound
        } else if self.is_rate_limit() {
            ErrorCategory::RateLimit
        } else if self.is_auth() {
            ErrorCategory::Auth
        } else {
            ErrorCategory::Unknown
        }
    }

    fn code_or_type_is(&self, sentinel: &str) -> bool {
        self.error_code.as_deref() == Some(sentinel) || self.error_type.as_deref() == Some(sentinel)
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed with status {} ({}): {}",
            self.provider,
            self.http_status,
            self.category(),
            self.message
        )
    }
}

impl Error for ServiceError {}
