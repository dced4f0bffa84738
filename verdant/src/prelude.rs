//! Single-import surface for applications built on the facade crate.

pub use crate::runtime::{
    filesystem_store, http_advisor, http_advisor_at, in_memory_store, observed_hooks,
    restored_session, session,
};
pub use vadvisor::prelude::*;
pub use vcommon::{BoxFuture, MessageId, MessageIdSequence, StorageKey};
pub use vobserve::prelude::*;
pub use vsession::prelude::*;
pub use vstore::prelude::*;
