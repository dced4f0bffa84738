//! Advisory endpoint error kinds and error value helpers.
//!
//! ```rust
//! use vadvisor::AdvisorError;
//!
//! let timeout = AdvisorError::timeout("deadline exceeded");
//! assert!(timeout.retryable);
//!
//! let invalid = AdvisorError::invalid_request("empty question");
//! assert!(!invalid.retryable);
//! ```

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorErrorKind {
    InvalidRequest,
    Timeout,
    Transport,
    Unavailable,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisorError {
    pub kind: AdvisorErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl AdvisorError {
    pub fn new(kind: AdvisorErrorKind, message: impl Into<String>, retryable: bool) -> Self {
        Self {
            kind,
            message: message.into(),
            retryable,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(AdvisorErrorKind::InvalidRequest, message, false)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AdvisorErrorKind::Timeout, message, true)
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(AdvisorErrorKind::Transport, message, true)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(AdvisorErrorKind::Unavailable, message, true)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(AdvisorErrorKind::Other, message, false)
    }
}

impl Display for AdvisorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for AdvisorError {}
