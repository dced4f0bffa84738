//! Client for the remote advisory endpoint.
//!
//! The advisory service is an opaque HTTP endpoint: one POST with a
//! `{"question": ...}` body, one JSON reply carrying the answer text. This
//! crate owns the transport, the reply-shape handling, and the error
//! classification; conversation state lives elsewhere.

mod client;
mod error;
mod http;

pub mod prelude {
    pub use crate::{
        AdvisorClient, AdvisorError, AdvisorErrorKind, AdvisorFuture, AdvisorReply,
        HttpAdvisorClient, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT,
    };
}

pub use client::{AdvisorClient, AdvisorFuture, AdvisorReply};
pub use error::{AdvisorError, AdvisorErrorKind};
pub use http::{HttpAdvisorClient, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT};
