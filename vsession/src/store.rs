//! Session storage contract and a basic in-memory implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

use crate::{ConversationLog, SessionError};

pub type SessionFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One key-value slot holding the whole serialized transcript.
///
/// `persist` has full-overwrite semantics; `erase` removes the slot entirely
/// so a later `restore` finds nothing, regardless of prior write timing.
/// Callers must not persist an empty log produced at startup: that would
/// clobber a previously saved transcript before the user has typed anything.
pub trait SessionStore: Send + Sync {
    fn restore<'a>(&'a self) -> SessionFuture<'a, Result<ConversationLog, SessionError>>;

    fn persist<'a>(&'a self, log: ConversationLog) -> SessionFuture<'a, Result<(), SessionError>>;

    fn erase<'a>(&'a self) -> SessionFuture<'a, Result<(), SessionError>>;
}

#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    slot: Mutex<Option<ConversationLog>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn restore<'a>(&'a self) -> SessionFuture<'a, Result<ConversationLog, SessionError>> {
        Box::pin(async move {
            let slot = self
                .slot
                .lock()
                .map_err(|_| SessionError::storage("session store lock poisoned"))?;

            Ok(slot.clone().unwrap_or_default())
        })
    }

    fn persist<'a>(&'a self, log: ConversationLog) -> SessionFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let mut slot = self
                .slot
                .lock()
                .map_err(|_| SessionError::storage("session store lock poisoned"))?;

            *slot = Some(log);
            Ok(())
        })
    }

    fn erase<'a>(&'a self) -> SessionFuture<'a, Result<(), SessionError>> {
        Box::pin(async move {
            let mut slot = self
                .slot
                .lock()
                .map_err(|_| SessionError::storage("session store lock poisoned"))?;

            *slot = None;
            Ok(())
        })
    }
}
