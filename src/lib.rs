//! Loan assistant - conversation session controller
//!
//! Owns the transcript of one chat session with a remote question-answering
//! service, enforces a single in-flight request, and publishes snapshots for
//! whatever presentation layer drives it.

pub mod canned;
pub mod config;
pub mod conversation;
pub mod fetcher;
pub mod runtime;
pub mod state_machine;

pub use config::ChatConfig;
pub use conversation::{Role, Snapshot, Turn, TurnId};
pub use fetcher::{AnswerFetcher, FetchError, FetchErrorKind, HttpFetcher};
pub use runtime::{spawn_session, SendOutcome, SessionError, SessionHandle};
pub use state_machine::SessionContext;
