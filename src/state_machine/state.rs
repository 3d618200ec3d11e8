//! Session state types

use crate::canned;
use serde::{Deserialize, Serialize};

/// Controller state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionState {
    /// Ready for input, nothing in flight
    #[default]
    Idle,

    /// One answer request in flight
    Awaiting {
        /// The trimmed query that was dispatched
        query: String,
    },
}

impl SessionState {
    pub fn is_awaiting(&self) -> bool {
        matches!(self, SessionState::Awaiting { .. })
    }
}

/// Fixed texts for one session (immutable configuration)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// First assistant turn, created with the session
    pub greeting: String,
    /// Assistant turn appended when an answer request fails
    pub apology: String,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            greeting: canned::GREETING.to_string(),
            apology: canned::APOLOGY.to_string(),
        }
    }
}
