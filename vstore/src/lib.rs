//! Persistence backends for the conversation session store.

mod filesystem;

pub mod prelude {
    pub use crate::{FilesystemSessionStore, DEFAULT_STORAGE_KEY};
    pub use vsession::{SessionStore, StorageKey};
}

pub use filesystem::{FilesystemSessionStore, DEFAULT_STORAGE_KEY};
