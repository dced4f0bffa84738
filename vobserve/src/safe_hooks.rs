use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Duration;

use vadvisor::AdvisorError;
use vcommon::MessageId;
use vsession::{IgnoreReason, SessionError, SessionHooks, Settlement};

/// Wrapper that keeps a panicking hook implementation from tearing down the
/// session turn it is observing.
pub struct SafeSessionHooks<H> {
    inner: H,
}

impl<H> SafeSessionHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> SessionHooks for SafeSessionHooks<H>
where
    H: SessionHooks,
{
    fn on_submit_ignored(&self, reason: IgnoreReason) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_submit_ignored(reason)));
    }

    fn on_turn_start(&self, user_message_id: MessageId) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_start(user_message_id)
        }));
    }

    fn on_turn_settled(&self, settlement: Settlement, elapsed: Duration) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_turn_settled(settlement, elapsed)
        }));
    }

    fn on_remote_failure(&self, error: &AdvisorError) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_remote_failure(error)));
    }

    fn on_stale_settlement_dropped(&self, generation: u64) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_stale_settlement_dropped(generation)
        }));
    }

    fn on_history_cleared(&self) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_history_cleared()));
    }

    fn on_persistence_failure(&self, operation: &str, error: &SessionError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_persistence_failure(operation, error)
        }));
    }
}
