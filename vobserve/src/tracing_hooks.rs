//! Tracing-based observability hooks for the session lifecycle.
//!
//! ```rust
//! use vobserve::TracingSessionHooks;
//! use vsession::SessionHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = TracingSessionHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use vadvisor::AdvisorError;
use vcommon::MessageId;
use vsession::{IgnoreReason, SessionError, SessionHooks, Settlement};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSessionHooks;

impl SessionHooks for TracingSessionHooks {
    fn on_submit_ignored(&self, reason: IgnoreReason) {
        tracing::debug!(phase = "session", event = "submit_ignored", reason = %reason);
    }

    fn on_turn_start(&self, user_message_id: MessageId) {
        tracing::info!(
            phase = "session",
            event = "turn_start",
            user_message_id = %user_message_id
        );
    }

    fn on_turn_settled(&self, settlement: Settlement, elapsed: Duration) {
        tracing::info!(
            phase = "session",
            event = "turn_settled",
            settlement = %settlement,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_remote_failure(&self, error: &AdvisorError) {
        tracing::warn!(
            phase = "session",
            event = "remote_failure",
            error_kind = ?error.kind,
            retryable = error.retryable,
            error = %error
        );
    }

    fn on_stale_settlement_dropped(&self, generation: u64) {
        tracing::warn!(
            phase = "session",
            event = "stale_settlement_dropped",
            generation
        );
    }

    fn on_history_cleared(&self) {
        tracing::info!(phase = "session", event = "history_cleared");
    }

    fn on_persistence_failure(&self, operation: &str, error: &SessionError) {
        tracing::error!(
            phase = "session",
            event = "persistence_failure",
            operation,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
