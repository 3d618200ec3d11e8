//! Events that can occur in a session

use crate::fetcher::FetchError;

/// Events that trigger state transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // User events
    /// Raw input from the presentation layer, not yet trimmed
    UserMessage { text: String },

    // Fetch events
    AnswerReceived { answer: String },
    AnswerFailed { error: FetchError },
}

impl Event {
    pub fn user_message(text: impl Into<String>) -> Self {
        Event::UserMessage { text: text.into() }
    }

    pub fn from_fetch(result: Result<String, FetchError>) -> Self {
        match result {
            Ok(answer) => Event::AnswerReceived { answer },
            Err(error) => Event::AnswerFailed { error },
        }
    }

    /// Whether this event resolves an in-flight request
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            Event::AnswerReceived { .. } | Event::AnswerFailed { .. }
        )
    }
}
