//! Conversation log
//!
//! An append-only transcript of turns plus the pending flag, published to
//! presentation layers as immutable snapshots.

mod store;
mod turn;

pub use store::{ConversationLog, ConversationStore, Snapshot};
pub use turn::{Role, Turn, TurnId};
