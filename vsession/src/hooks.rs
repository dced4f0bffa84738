//! Session observation hook contracts.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use vadvisor::AdvisorError;
use vcommon::MessageId;

use crate::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    EmptyInput,
    Busy,
}

impl Display for IgnoreReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::EmptyInput => "empty_input",
            Self::Busy => "busy",
        };

        f.write_str(label)
    }
}

/// How one advisory turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The endpoint returned a usable answer.
    Answered,
    /// The reply carried no usable answer; the apology fallback was shown.
    EmptyAnswer,
    /// The remote call failed; the failure fallback was shown.
    Failed,
}

impl Display for Settlement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Answered => "answered",
            Self::EmptyAnswer => "empty_answer",
            Self::Failed => "failed",
        };

        f.write_str(label)
    }
}

pub trait SessionHooks: Send + Sync {
    fn on_submit_ignored(&self, _reason: IgnoreReason) {}

    fn on_turn_start(&self, _user_message_id: MessageId) {}

    fn on_turn_settled(&self, _settlement: Settlement, _elapsed: Duration) {}

    fn on_remote_failure(&self, _error: &AdvisorError) {}

    fn on_stale_settlement_dropped(&self, _generation: u64) {}

    fn on_history_cleared(&self) {}

    fn on_persistence_failure(&self, _operation: &str, _error: &SessionError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSessionHooks;

impl SessionHooks for NoopSessionHooks {}
