//! Conversation session management over the remote advisory endpoint.
//!
//! Owns the ordered transcript, its persistence, and the single-flight
//! request discipline: at most one advisory call is outstanding at a time,
//! every settlement appends exactly one advisor message, and every failure
//! folds into a fixed fallback message instead of surfacing an error.

mod error;
mod hooks;
mod service;
mod store;
mod types;

pub mod prelude {
    pub use crate::{
        ConversationLog, IgnoreReason, InMemorySessionStore, Message, NoopSessionHooks, Origin,
        SessionError, SessionErrorKind, SessionHooks, SessionService, SessionServiceBuilder,
        SessionStore, Settlement, SubmitOutcome, TurnResult, EMPTY_ANSWER_FALLBACK,
        REQUEST_FAILED_FALLBACK,
    };
    pub use vcommon::{MessageId, MessageIdSequence, StorageKey};
}

pub use error::{SessionError, SessionErrorKind};
pub use hooks::{IgnoreReason, NoopSessionHooks, SessionHooks, Settlement};
pub use service::{
    SessionService, SessionServiceBuilder, SubmitOutcome, TurnResult, EMPTY_ANSWER_FALLBACK,
    REQUEST_FAILED_FALLBACK,
};
pub use store::{InMemorySessionStore, SessionFuture, SessionStore};
pub use types::{ConversationLog, Message, Origin};
pub use vcommon::{MessageId, MessageIdSequence, StorageKey};
