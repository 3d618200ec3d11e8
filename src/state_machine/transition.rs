//! Pure state transition function

use super::{Effect, Event, SessionContext, SessionState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SessionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SessionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is ignored. None of them change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    BlankInput,
    #[error("An answer is still pending; message dropped")]
    Busy,
    #[error("Answer arrived with no request in flight")]
    UnexpectedResolution,
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &SessionState,
    context: &SessionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Idle + UserMessage -> Awaiting
        (SessionState::Idle, Event::UserMessage { text }) => {
            let query = text.trim();
            if query.is_empty() {
                return Err(TransitionError::BlankInput);
            }
            Ok(TransitionResult::new(SessionState::Awaiting {
                query: query.to_string(),
            })
            .with_effect(Effect::append_user_turn(query))
            .with_effect(Effect::SetPending(true))
            .with_effect(Effect::fetch_answer(query)))
        }

        // Single flight: drop, never queue
        (SessionState::Awaiting { .. }, Event::UserMessage { .. }) => Err(TransitionError::Busy),

        // Awaiting + AnswerReceived -> Idle
        (SessionState::Awaiting { .. }, Event::AnswerReceived { answer }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::append_assistant_turn(answer))
                .with_effect(Effect::RecordError(None))
                .with_effect(Effect::SetPending(false)))
        }

        // Awaiting + AnswerFailed -> Idle, with the apology in place of an answer
        (SessionState::Awaiting { .. }, Event::AnswerFailed { error }) => {
            Ok(TransitionResult::new(SessionState::Idle)
                .with_effect(Effect::append_assistant_turn(context.apology.clone()))
                .with_effect(Effect::RecordError(Some(error.kind())))
                .with_effect(Effect::SetPending(false)))
        }

        (SessionState::Idle, Event::AnswerReceived { .. } | Event::AnswerFailed { .. }) => {
            Err(TransitionError::UnexpectedResolution)
        }
    }
}
