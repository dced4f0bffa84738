//! Unified facade over the verdant workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the core crates and provides wiring helpers that assemble a
//! ready-to-use conversation session over the remote advisory endpoint.

pub mod prelude;
pub mod runtime;

pub use vadvisor;
pub use vcommon;
pub use vobserve;
pub use vsession;
pub use vstore;

pub use vadvisor::{
    AdvisorClient, AdvisorError, AdvisorErrorKind, AdvisorFuture, AdvisorReply, HttpAdvisorClient,
    DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT,
};
pub use vcommon::{BoxFuture, MessageId, MessageIdSequence, StorageKey};
pub use vobserve::{MetricsSessionHooks, SafeSessionHooks, TracingSessionHooks};
pub use vsession::{
    ConversationLog, IgnoreReason, InMemorySessionStore, Message, NoopSessionHooks, Origin,
    SessionError, SessionErrorKind, SessionFuture, SessionHooks, SessionService,
    SessionServiceBuilder, SessionStore, Settlement, SubmitOutcome, TurnResult,
    EMPTY_ANSWER_FALLBACK, REQUEST_FAILED_FALLBACK,
};
pub use vstore::{FilesystemSessionStore, DEFAULT_STORAGE_KEY};

pub use runtime::{
    filesystem_store, http_advisor, http_advisor_at, in_memory_store, observed_hooks,
    restored_session, session,
};
