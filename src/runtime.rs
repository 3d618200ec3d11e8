//! Runtime for driving one conversation session
//!
//! The runtime task is the session's single thread of control: commands from
//! handles and answers from fetch tasks are processed one at a time.

mod executor;


pub use executor::SessionRuntime;
pub(crate) use executor::commit;

use crate::conversation::Snapshot;
use crate::fetcher::{AnswerFetcher, LoggingFetcher};
use crate::state_machine::{SessionContext, TransitionError};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};

/// How the runtime handled a `send`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// User turn appended and the request dispatched
    Accepted,
    /// Dropped without touching the transcript
    Ignored(TransitionError),
}

impl SendOutcome {
    pub fn is_accepted(self) -> bool {
        self == SendOutcome::Accepted
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session runtime has stopped")]
    Closed,
}

/// Commands sent from handles to the runtime
#[derive(Debug)]
pub(crate) enum Command {
    Send {
        text: String,
        ack: oneshot::Sender<SendOutcome>,
    },
}

/// Handle to interact with a running session
///
/// The session lives as long as at least one handle does. Dropping the last
/// handle stops the runtime; an answer still in flight is then discarded.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl SessionHandle {
    /// Submit user input. Resolves once the runtime has applied it, so the
    /// next snapshot already shows the user turn and the pending flag.
    pub async fn send(&self, text: impl Into<String>) -> Result<SendOutcome, SessionError> {
        let (ack, ack_rx) = oneshot::channel();
        self.command_tx
            .send(Command::Send {
                text: text.into(),
                ack,
            })
            .await
            .map_err(|_| SessionError::Closed)?;
        ack_rx.await.map_err(|_| SessionError::Closed)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified after every committed mutation
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Wait for the in-flight request (if any) to resolve
    pub async fn wait_until_idle(&self) -> Result<Snapshot, SessionError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx
            .wait_for(|s| !s.pending)
            .await
            .map_err(|_| SessionError::Closed)?;
        Ok(snapshot.clone())
    }
}

/// Start a session on the current tokio runtime
///
/// The transcript starts with `context.greeting`. Fetch outcomes are logged
/// through [`LoggingFetcher`].
pub fn spawn_session<F>(fetcher: F, context: SessionContext) -> SessionHandle
where
    F: AnswerFetcher + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(32);
    let runtime = SessionRuntime::new(context, LoggingFetcher::new(fetcher), command_rx);
    let snapshots = runtime.subscribe();
    tokio::spawn(runtime.run());

    SessionHandle {
        command_tx,
        snapshots,
    }
}
