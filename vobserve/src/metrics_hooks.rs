//! Metrics-based observability hooks for the session lifecycle.
//!
//! ```rust
//! use vobserve::MetricsSessionHooks;
//! use vsession::SessionHooks;
//!
//! fn accepts_session_hooks(_hooks: &dyn SessionHooks) {}
//!
//! let hooks = MetricsSessionHooks;
//! accepts_session_hooks(&hooks);
//! ```

use std::time::Duration;

use vadvisor::AdvisorError;
use vcommon::MessageId;
use vsession::{IgnoreReason, SessionError, SessionHooks, Settlement};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSessionHooks;

impl SessionHooks for MetricsSessionHooks {
    fn on_submit_ignored(&self, reason: IgnoreReason) {
        metrics::counter!(
            "verdant_session_submit_ignored_total",
            "reason" => reason.to_string()
        )
        .increment(1);
    }

    fn on_turn_start(&self, _user_message_id: MessageId) {
        metrics::counter!("verdant_session_turn_start_total").increment(1);
    }

    fn on_turn_settled(&self, settlement: Settlement, elapsed: Duration) {
        metrics::counter!(
            "verdant_session_turn_settled_total",
            "settlement" => settlement.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "verdant_session_turn_latency_seconds",
            "settlement" => settlement.to_string()
        )
        .record(elapsed.as_secs_f64());
    }

    fn on_remote_failure(&self, error: &AdvisorError) {
        metrics::counter!(
            "verdant_session_remote_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }

    fn on_stale_settlement_dropped(&self, _generation: u64) {
        metrics::counter!("verdant_session_stale_settlement_dropped_total").increment(1);
    }

    fn on_history_cleared(&self) {
        metrics::counter!("verdant_session_history_cleared_total").increment(1);
    }

    fn on_persistence_failure(&self, operation: &str, error: &SessionError) {
        metrics::counter!(
            "verdant_session_persistence_failure_total",
            "operation" => operation.to_string(),
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
