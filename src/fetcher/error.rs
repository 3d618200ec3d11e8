//! Fetch error types

use serde::Serialize;
use thiserror::Error;

/// Failure of one round trip to the answer service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The call completed with a non-success status
    #[error("answer service returned HTTP {status}")]
    Http { status: u16 },

    /// The call could not complete (connect, DNS, timeout, body read)
    #[error("answer service unreachable: {message}")]
    Network { message: String },
}

impl FetchError {
    pub fn http(status: u16) -> Self {
        Self::Http { status }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Http { status } => FetchErrorKind::Http { status: *status },
            Self::Network { .. } => FetchErrorKind::Network,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => Self::http(status.as_u16()),
            None => Self::network(e.to_string()),
        }
    }
}

/// Error classification kept for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FetchErrorKind {
    /// Non-success HTTP status (e.g. 500)
    Http { status: u16 },
    /// Transport failure before a status was received
    Network,
}
