//! Property-based tests for the state machine
//!
//! These tests drive random command/answer sequences through the pure
//! transition function and a real store, and check the invariants after
//! every step.

use super::*;
use crate::conversation::{ConversationStore, Role, Snapshot};
use crate::fetcher::FetchError;
use crate::runtime::commit;
use proptest::prelude::*;

// ============================================================================
// Test Harness
// ============================================================================

#[derive(Debug, Clone)]
enum Step {
    Send(String),
    Resolve(Result<String, FetchError>),
}

struct Harness {
    context: SessionContext,
    state: SessionState,
    store: ConversationStore,
    /// Queries dispatched and not yet resolved
    outstanding: Vec<String>,
}

impl Harness {
    fn new() -> Self {
        let context = SessionContext::default();
        let store = ConversationStore::new(&context.greeting);
        Self {
            context,
            state: SessionState::Idle,
            store,
            outstanding: Vec::new(),
        }
    }

    /// Run one step the way the runtime does; returns the dispatched queries
    fn step(&mut self, step: Step) -> Result<Vec<String>, TransitionError> {
        let event = match step {
            Step::Send(text) => Event::UserMessage { text },
            Step::Resolve(result) => Event::from_fetch(result),
        };
        let is_resolution = event.is_resolution();

        let result = transition(&self.state, &self.context, event)?;
        self.state = result.new_state;
        let dispatched = commit(&self.store, result.effects);

        if is_resolution {
            self.outstanding.pop();
        }
        self.outstanding.extend(dispatched.iter().cloned());
        Ok(dispatched)
    }

    fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_blank() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[ \t\n]{1,6}"]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        1 => arb_blank(),
        4 => "[ ]{0,2}[a-zA-Z0-9?%.][a-zA-Z0-9?%. ]{0,30}",
    ]
}

fn arb_fetch_error() -> impl Strategy<Value = FetchError> {
    prop_oneof![
        (100u16..600).prop_map(FetchError::http),
        "[a-z ]{1,20}".prop_map(FetchError::network),
    ]
}

fn arb_fetch_result() -> impl Strategy<Value = Result<String, FetchError>> {
    prop_oneof![
        "[a-zA-Z0-9 .%]{0,40}".prop_map(Ok),
        arb_fetch_error().prop_map(Err),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => arb_text().prop_map(Step::Send),
        2 => arb_fetch_result().prop_map(Step::Resolve),
    ]
}

fn arb_steps() -> impl Strategy<Value = Vec<Step>> {
    proptest::collection::vec(arb_step(), 0..40)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_transcript_is_append_only(steps in arb_steps()) {
        let mut h = Harness::new();
        for step in steps {
            let before = h.snapshot();
            let _ = h.step(step);
            let after = h.snapshot();

            prop_assert!(after.turns.len() >= before.turns.len());
            prop_assert_eq!(&after.turns[..before.turns.len()], &before.turns[..]);
        }
    }

    #[test]
    fn prop_pending_iff_one_outstanding_request(steps in arb_steps()) {
        let mut h = Harness::new();
        for step in steps {
            let _ = h.step(step);
            let snap = h.snapshot();

            prop_assert!(h.outstanding.len() <= 1);
            prop_assert_eq!(snap.pending, h.outstanding.len() == 1);
            prop_assert_eq!(snap.pending, h.state.is_awaiting());
        }
    }

    #[test]
    fn prop_rejected_events_change_nothing(steps in arb_steps()) {
        let mut h = Harness::new();
        for step in steps {
            let before = h.snapshot();
            let state_before = h.state.clone();
            if h.step(step).is_err() {
                prop_assert_eq!(h.snapshot(), before);
                prop_assert_eq!(&h.state, &state_before);
            }
        }
    }

    #[test]
    fn prop_blank_input_never_mutates(prefix in arb_steps(), blank in arb_blank()) {
        let mut h = Harness::new();
        for step in prefix {
            let _ = h.step(step);
        }

        let before = h.snapshot();
        let result = h.step(Step::Send(blank));
        prop_assert!(result.is_err());
        prop_assert_eq!(h.snapshot(), before);
    }

    #[test]
    fn prop_send_while_pending_never_dispatches(
        first in "[a-z]{1,10}",
        rest in proptest::collection::vec(arb_text(), 1..5),
    ) {
        let mut h = Harness::new();
        prop_assert_eq!(h.step(Step::Send(first.clone())).unwrap(), vec![first]);

        let during = h.snapshot();
        for text in rest {
            let result = h.step(Step::Send(text));
            prop_assert!(result.is_err());
        }
        prop_assert_eq!(h.snapshot(), during);
        prop_assert_eq!(h.outstanding.len(), 1);
    }

    #[test]
    fn prop_greeting_first_and_ids_increase(steps in arb_steps()) {
        let mut h = Harness::new();
        for step in steps {
            let _ = h.step(step);
        }

        let snap = h.snapshot();
        prop_assert_eq!(snap.turns[0].role(), Role::Assistant);
        prop_assert_eq!(snap.turns[0].content(), h.context.greeting.as_str());
        prop_assert!(snap.turns.windows(2).all(|w| w[0].id() < w[1].id()));
    }

    #[test]
    fn prop_resolution_appends_one_assistant_turn(
        query in "[a-z]{1,10}",
        result in arb_fetch_result(),
    ) {
        let mut h = Harness::new();
        h.step(Step::Send(query)).unwrap();
        h.step(Step::Resolve(result.clone())).unwrap();

        let snap = h.snapshot();
        prop_assert_eq!(snap.turns.len(), 3);
        let last = snap.last_turn().unwrap();
        prop_assert_eq!(last.role(), Role::Assistant);
        match result {
            Ok(answer) => {
                prop_assert_eq!(last.content(), answer.as_str());
                prop_assert_eq!(snap.last_error, None);
            }
            Err(error) => {
                prop_assert_eq!(last.content(), h.context.apology.as_str());
                prop_assert_eq!(snap.last_error, Some(error.kind()));
            }
        }
    }

    #[test]
    fn prop_user_turns_are_trimmed_and_non_empty(steps in arb_steps()) {
        let mut h = Harness::new();
        for step in steps {
            let _ = h.step(step);
        }

        for turn in h.snapshot().user_turns() {
            prop_assert!(!turn.content().is_empty());
            prop_assert_eq!(turn.content().trim(), turn.content());
        }
    }
}
