//! Reqwest-based HTTP implementation of the advisor client.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;

use crate::{AdvisorClient, AdvisorError, AdvisorFuture, AdvisorReply};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5678/webhook-test/health-agent/ask";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Name of the reply field carrying the answer text.
const ANSWER_FIELD: &str = "Format Réponse";

#[derive(Debug, Clone)]
pub struct HttpAdvisorClient {
    client: Client,
    endpoint: String,
    request_timeout: Duration,
}

impl HttpAdvisorClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Bounds each call so a hung endpoint settles as a timeout failure
    /// instead of leaving the session waiting forever.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn classify_error_response(response: Response) -> AdvisorError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = format!(
            "advisory endpoint returned status {status}: {}",
            truncate(&body, 4096)
        );

        match status {
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                AdvisorError::timeout(message)
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                AdvisorError::invalid_request(message)
            }
            StatusCode::SERVICE_UNAVAILABLE | StatusCode::BAD_GATEWAY => {
                AdvisorError::unavailable(message)
            }
            _ => AdvisorError::transport(message),
        }
    }
}

impl AdvisorClient for HttpAdvisorClient {
    fn ask<'a>(&'a self, question: &'a str) -> AdvisorFuture<'a, Result<AdvisorReply, AdvisorError>> {
        Box::pin(async move {
            let body = AskRequestBody { question };
            let response = self
                .client
                .post(&self.endpoint)
                .timeout(self.request_timeout)
                .json(&body)
                .send()
                .await
                .map_err(|err| {
                    if err.is_timeout() {
                        AdvisorError::timeout(err.to_string())
                    } else {
                        AdvisorError::transport(err.to_string())
                    }
                })?;

            if !response.status().is_success() {
                return Err(Self::classify_error_response(response).await);
            }

            let body = response
                .text()
                .await
                .map_err(|err| AdvisorError::transport(err.to_string()))?;

            Ok(parse_reply(&body))
        })
    }
}

#[derive(Debug, Serialize)]
struct AskRequestBody<'a> {
    question: &'a str,
}

/// Any reply shape other than a JSON object with a string answer field is an
/// empty answer, never a parse error.
fn parse_reply(body: &str) -> AdvisorReply {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return AdvisorReply::empty();
    };

    match value.get(ANSWER_FIELD).and_then(Value::as_str) {
        Some(answer) => AdvisorReply::answered(answer),
        None => AdvisorReply::empty(),
    }
}

fn truncate(input: &str, max: usize) -> String {
    if input.len() <= max {
        return input.to_string();
    }
    let mut output = String::new();
    for ch in input.chars() {
        if output.len() + ch.len_utf8() > max {
            break;
        }
        output.push(ch);
    }
    output.push_str("...");
    output
}

#[cfg(test)]
mod tests {
    use super::{parse_reply, truncate, HttpAdvisorClient, DEFAULT_ENDPOINT};
    use reqwest::Client;

    #[test]
    fn parse_reply_extracts_answer_field() {
        let reply = parse_reply(r#"{"Format Réponse": "60-100 bpm"}"#);
        assert_eq!(reply.usable_answer(), Some("60-100 bpm"));
    }

    #[test]
    fn parse_reply_treats_missing_field_as_empty_answer() {
        assert_eq!(parse_reply(r#"{"other": "value"}"#).answer, None);
        assert_eq!(parse_reply(r#"{}"#).answer, None);
    }

    #[test]
    fn parse_reply_treats_unexpected_shapes_as_empty_answer() {
        assert_eq!(parse_reply("not json at all").answer, None);
        assert_eq!(parse_reply(r#""just a string""#).answer, None);
        assert_eq!(parse_reply(r#"{"Format Réponse": 42}"#).answer, None);
        assert_eq!(parse_reply(r#"[1, 2, 3]"#).answer, None);
    }

    #[test]
    fn parse_reply_keeps_blank_answers_for_the_session_layer() {
        let reply = parse_reply(r#"{"Format Réponse": "   "}"#);
        assert_eq!(reply.answer.as_deref(), Some("   "));
        assert_eq!(reply.usable_answer(), None);
    }

    #[test]
    fn builder_overrides_endpoint() {
        let client = HttpAdvisorClient::new(Client::new());
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);

        let client = client.with_endpoint("http://example.test/ask");
        assert_eq!(client.endpoint(), "http://example.test/ask");
    }

    #[tokio::test]
    async fn unreachable_endpoint_maps_to_a_transport_error() {
        use crate::{AdvisorClient, AdvisorErrorKind};

        // Nothing listens on the discard port; the call must settle as an
        // error instead of hanging or panicking.
        let client =
            HttpAdvisorClient::new(Client::new()).with_endpoint("http://127.0.0.1:9/ask");

        let error = client.ask("question").await.expect_err("call must fail");
        assert!(matches!(
            error.kind,
            AdvisorErrorKind::Transport | AdvisorErrorKind::Timeout
        ));
        assert!(error.retryable);
    }

    #[test]
    fn truncate_bounds_long_bodies() {
        let long = "x".repeat(5000);
        let truncated = truncate(&long, 16);
        assert_eq!(truncated, format!("{}...", "x".repeat(16)));
        assert_eq!(truncate("short", 16), "short");
    }
}
