//! Conversation store
//!
//! Holds the transcript and the pending flag behind a `watch` channel. Every
//! committed mutation replaces the published snapshot, so the next read by
//! any subscriber sees it.

use super::turn::{Role, Turn, TurnId};
use crate::fetcher::FetchErrorKind;
use serde::Serialize;
use tokio::sync::watch;

/// Observable session state handed to presentation layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Transcript in insertion order; the greeting is always first
    pub turns: Vec<Turn>,
    /// True while one answer request is in flight
    pub pending: bool,
    /// Classification of the most recent failure, cleared by the next answer.
    /// Diagnostics only, never rendered as transcript text.
    pub last_error: Option<FetchErrorKind>,
}

impl Snapshot {
    fn with_greeting(greeting: &str) -> Self {
        Self {
            turns: vec![Turn::new(
                TurnId::FIRST,
                Role::Assistant,
                greeting.to_string(),
            )],
            pending: false,
            last_error: None,
        }
    }

    /// Suggested questions are offered until the first user turn
    pub fn shows_suggestions(&self) -> bool {
        self.turns.len() == 1
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn user_turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter().filter(|t| t.is_user())
    }
}

/// Mutable view over the transcript, valid for one atomic update
pub struct ConversationLog<'a> {
    snapshot: &'a mut Snapshot,
}

impl ConversationLog<'_> {
    /// Append a turn at the end of the transcript
    pub fn append(&mut self, role: Role, content: impl Into<String>) -> TurnId {
        let id = self
            .snapshot
            .turns
            .last()
            .map_or(TurnId::FIRST, |t| t.id().next());
        self.snapshot.turns.push(Turn::new(id, role, content.into()));
        id
    }

    pub fn set_pending(&mut self, pending: bool) {
        self.snapshot.pending = pending;
    }

    pub fn set_last_error(&mut self, kind: Option<FetchErrorKind>) {
        self.snapshot.last_error = kind;
    }

    pub fn pending(&self) -> bool {
        self.snapshot.pending
    }
}

/// Append-only transcript store for one session
#[derive(Debug)]
pub struct ConversationStore {
    tx: watch::Sender<Snapshot>,
}

impl ConversationStore {
    /// Create a store whose transcript starts with the assistant greeting
    pub fn new(greeting: &str) -> Self {
        let (tx, _rx) = watch::channel(Snapshot::with_greeting(greeting));
        Self { tx }
    }

    /// Apply several mutations as one step. Subscribers are notified once,
    /// after the closure returns.
    pub fn update<R>(&self, f: impl FnOnce(&mut ConversationLog<'_>) -> R) -> R {
        let mut out = None;
        self.tx.send_modify(|snapshot| {
            let mut log = ConversationLog { snapshot };
            out = Some(f(&mut log));
        });
        // send_modify always runs the closure
        out.unwrap_or_else(|| unreachable!("send_modify skipped the update closure"))
    }

    pub fn append(&self, role: Role, content: impl Into<String>) -> TurnId {
        let content = content.into();
        self.update(|log| log.append(role, content))
    }

    pub fn set_pending(&self, pending: bool) {
        self.update(|log| log.set_pending(pending));
    }

    pub fn snapshot(&self) -> Snapshot {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }
}
