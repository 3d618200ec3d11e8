//! Session runtime executor

use super::{Command, SendOutcome};
use crate::conversation::{ConversationStore, Snapshot};
use crate::fetcher::AnswerFetcher;
use crate::state_machine::{transition, Effect, Event, SessionContext, SessionState};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Owns the store and state for one session and executes transition effects
pub struct SessionRuntime<F>
where
    F: AnswerFetcher + 'static,
{
    context: SessionContext,
    state: SessionState,
    store: ConversationStore,
    fetcher: Arc<F>,
    command_rx: mpsc::Receiver<Command>,
    /// Completions from fetch tasks
    event_rx: mpsc::Receiver<Event>,
    event_tx: mpsc::Sender<Event>,
}

impl<F> SessionRuntime<F>
where
    F: AnswerFetcher + 'static,
{
    pub(crate) fn new(
        context: SessionContext,
        fetcher: F,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        // At most one fetch is outstanding, so one slot is enough
        let (event_tx, event_rx) = mpsc::channel(1);
        let store = ConversationStore::new(&context.greeting);
        Self {
            context,
            state: SessionState::Idle,
            store,
            fetcher: Arc::new(fetcher),
            command_rx,
            event_rx,
            event_tx,
        }
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.store.subscribe()
    }

    pub async fn run(mut self) {
        tracing::info!("Starting session runtime");

        loop {
            tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(Command::Send { text, ack }) => {
                        let outcome = self.process_event(Event::UserMessage { text });
                        // Caller may have stopped waiting; the outcome is already applied
                        let _ = ack.send(outcome);
                    }
                    // Every handle dropped: the session is gone
                    None => break,
                },
                Some(event) = self.event_rx.recv() => {
                    self.process_event(event);
                }
            }
        }

        if self.state.is_awaiting() {
            tracing::debug!("Session closed with an answer pending; it will be discarded");
        }
        tracing::info!("Session runtime stopped");
    }

    fn process_event(&mut self, event: Event) -> SendOutcome {
        let is_resolution = event.is_resolution();
        let result = match transition(&self.state, &self.context, event) {
            Ok(r) => r,
            Err(e) => {
                if is_resolution {
                    tracing::warn!(reason = %e, "Discarding answer");
                } else {
                    tracing::debug!(reason = %e, "Ignoring message");
                }
                return SendOutcome::Ignored(e);
            }
        };

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        tracing::debug!(from = ?old_state, to = ?self.state, "Session transition");

        for query in commit(&self.store, result.effects) {
            self.dispatch(query);
        }

        SendOutcome::Accepted
    }

    /// Spawn the answer request. The task reports back exactly once.
    fn dispatch(&self, query: String) {
        let fetcher = self.fetcher.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let result = fetcher.fetch_answer(&query).await;
            if event_tx.send(Event::from_fetch(result)).await.is_err() {
                tracing::debug!("Session closed before the answer arrived; discarding");
            }
        });
    }
}

/// Apply the store effects of one transition as a single update and return
/// the queries to dispatch afterwards
pub(crate) fn commit(store: &ConversationStore, effects: Vec<Effect>) -> Vec<String> {
    let mut dispatch = Vec::new();
    store.update(|log| {
        for effect in effects {
            match effect {
                Effect::AppendTurn { role, content } => {
                    log.append(role, content);
                }
                Effect::SetPending(pending) => log.set_pending(pending),
                Effect::RecordError(kind) => log.set_last_error(kind),
                Effect::FetchAnswer { query } => dispatch.push(query),
            }
        }
    });
    dispatch
}
