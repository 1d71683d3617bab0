use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotatorErrorKind {
    /// The rotator was built with nothing to rotate over.
    Configuration,
    /// The shared index could not be opened, locked, read or written.
    StateUnavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotatorError {
    pub kind: RotatorErrorKind,
    pub message: String,
}

impl RotatorError {
    pub fn new(kind: RotatorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(RotatorErrorKind::Configuration, message)
    }

    pub fn state_unavailable(message: impl Into<String>) -> Self {
        Self::new(RotatorErrorKind::StateUnavailable, message)
    }
}

impl Display for RotatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RotatorError {}
