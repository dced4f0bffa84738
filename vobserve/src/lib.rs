//! Production-friendly observability hooks for the conversation session.
//!
//! ```rust
//! use vobserve::{MetricsSessionHooks, SafeSessionHooks, TracingSessionHooks};
//!
//! let _hooks = SafeSessionHooks::new(TracingSessionHooks);
//! let _metrics = MetricsSessionHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsSessionHooks;
pub use safe_hooks::SafeSessionHooks;
pub use tracing_hooks::TracingSessionHooks;

pub mod prelude {
    pub use crate::{MetricsSessionHooks, SafeSessionHooks, TracingSessionHooks};
}
