use std::fmt;
use std::time::Duration;

use bootsecrets_core::FetchKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    NotFound,
    AccessDenied,
    /// Network or service trouble; worth retrying.
    Transient,
    /// The store refused the request for any other reason.
    Rejected,
}

impl FetchErrorKind {
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::Transient)
    }
}

impl fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NotFound => "secret not found",
            Self::AccessDenied => "access denied",
            Self::Transient => "transient failure",
            Self::Rejected => "request rejected",
        })
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} for secret {key}: {message}")]
pub struct FetchError {
    pub key: FetchKey,
    pub kind: FetchErrorKind,
    pub message: String,
    /// Server-provided hint for when to try again.
    pub retry_after: Option<Duration>,
}

impl FetchError {
    pub fn new(key: &FetchKey, kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            key: key.clone(),
            kind,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn not_found(key: &FetchKey, message: impl Into<String>) -> Self {
        Self::new(key, FetchErrorKind::NotFound, message)
    }

    pub fn access_denied(key: &FetchKey, message: impl Into<String>) -> Self {
        Self::new(key, FetchErrorKind::AccessDenied, message)
    }

    pub fn transient(key: &FetchKey, message: impl Into<String>) -> Self {
        Self::new(key, FetchErrorKind::Transient, message)
    }

    pub fn rejected(key: &FetchKey, message: impl Into<String>) -> Self {
        Self::new(key, FetchErrorKind::Rejected, message)
    }

    pub fn with_retry_after(mut self, delay: Option<Duration>) -> Self {
        self.retry_after = delay;
        self
    }
}
