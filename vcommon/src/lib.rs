//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use vcommon::{MessageIdSequence, StorageKey};
//!
//! let ids = MessageIdSequence::new();
//! let first = ids.next_id();
//! let second = ids.next_id();
//! assert!(second > first);
//!
//! let key = StorageKey::from("health-advisor-messages");
//! assert_eq!(key.as_str(), "health-advisor-messages");
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use vcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod ids {
    //! Monotonic message identifiers.
    //!
    //! Identifiers are ordered by creation: a later `next_id` call always
    //! returns a strictly greater id. A sequence can be advanced past ids
    //! recovered from storage so restored and fresh ids never collide.
    //!
    //! ```rust
    //! use vcommon::{MessageId, MessageIdSequence};
    //!
    //! let ids = MessageIdSequence::new();
    //! ids.advance_past(MessageId::new(41));
    //! assert_eq!(ids.next_id(), MessageId::new(42));
    //! ```

    use std::fmt::{Display, Formatter};
    use std::sync::atomic::{AtomicU64, Ordering};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct MessageId(u64);

    impl MessageId {
        pub fn new(value: u64) -> Self {
            Self(value)
        }

        pub fn value(&self) -> u64 {
            self.0
        }
    }

    impl Display for MessageId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    impl From<u64> for MessageId {
        fn from(value: u64) -> Self {
            Self(value)
        }
    }

    #[derive(Debug, Default)]
    pub struct MessageIdSequence {
        next: AtomicU64,
    }

    impl MessageIdSequence {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn starting_at(first: MessageId) -> Self {
            Self {
                next: AtomicU64::new(first.value()),
            }
        }

        pub fn next_id(&self) -> MessageId {
            MessageId::new(self.next.fetch_add(1, Ordering::Relaxed))
        }

        /// Ensures every future id is strictly greater than `id`. Used after
        /// restoring a transcript so new ids never collide with stored ones.
        pub fn advance_past(&self, id: MessageId) {
            let floor = id.value().saturating_add(1);
            self.next.fetch_max(floor, Ordering::Relaxed);
        }
    }
}

pub mod storage {
    //! Persistent storage key newtype.
    //!
    //! ```rust
    //! use vcommon::StorageKey;
    //!
    //! let key = StorageKey::new("health-advisor-messages");
    //! assert_eq!(key.to_string(), "health-advisor-messages");
    //! ```

    use std::fmt::{Display, Formatter};

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct StorageKey(String);

    impl StorageKey {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for StorageKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for StorageKey {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for StorageKey {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use future::BoxFuture;
pub use ids::{MessageId, MessageIdSequence};
pub use storage::StorageKey;
