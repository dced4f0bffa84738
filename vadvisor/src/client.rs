//! Advisor client contract and reply value type.

use std::future::Future;
use std::pin::Pin;

use crate::AdvisorError;

pub type AdvisorFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One reply from the advisory endpoint.
///
/// `answer` is `None` whenever the reply body did not carry the expected
/// answer field, whatever shape the body actually had. Deciding what to show
/// the user in that case belongs to the session layer, not the transport.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdvisorReply {
    pub answer: Option<String>,
}

impl AdvisorReply {
    pub fn answered(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the answer text when it is non-blank after trimming.
    pub fn usable_answer(&self) -> Option<&str> {
        self.answer
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

pub trait AdvisorClient: Send + Sync {
    /// Submits one question and resolves with the endpoint's reply.
    fn ask<'a>(&'a self, question: &'a str) -> AdvisorFuture<'a, Result<AdvisorReply, AdvisorError>>;
}

#[cfg(test)]
mod tests {
    use super::AdvisorReply;

    #[test]
    fn usable_answer_rejects_blank_and_missing_text() {
        assert_eq!(AdvisorReply::empty().usable_answer(), None);
        assert_eq!(AdvisorReply::answered("   ").usable_answer(), None);
        assert_eq!(
            AdvisorReply::answered(" 60-100 bpm ").usable_answer(),
            Some("60-100 bpm")
        );
    }
}
