//! Effects produced by state transitions

use crate::conversation::Role;
use crate::fetcher::FetchErrorKind;

/// Effects to be executed after state transition
///
/// Store effects from one transition are committed together; `FetchAnswer`
/// runs after the commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn { role: Role, content: String },

    /// Update the pending flag
    SetPending(bool),

    /// Replace the diagnostic error classification
    RecordError(Option<FetchErrorKind>),

    /// Dispatch one answer request (spawns as background task)
    FetchAnswer { query: String },
}

impl Effect {
    pub fn append_user_turn(content: impl Into<String>) -> Self {
        Effect::AppendTurn {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn append_assistant_turn(content: impl Into<String>) -> Self {
        Effect::AppendTurn {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn fetch_answer(query: impl Into<String>) -> Self {
        Effect::FetchAnswer {
            query: query.into(),
        }
    }
}
