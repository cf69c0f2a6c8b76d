//! `/chatbot` wire types and transport.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Native builds only see the trait so the controller can be driven by test
//! doubles.
//!
//! ERROR HANDLING
//! ==============
//! Every failure mode maps onto a [`DeliveryError`]. The controller never
//! shows these to the user; they all collapse into [`FALLBACK_REPLY`].

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::{Deserialize, Serialize};

/// Relative path of the chatbot endpoint on the host server.
pub const CHATBOT_ENDPOINT: &str = "/chatbot";

/// Bot message rendered whenever a reply cannot be delivered.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request. Please try again.";

/// Request body for `POST /chatbot`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Success body from `POST /chatbot`. Any other field is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

impl ChatReply {
    /// Decode a response body.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Parse`] when the body is not JSON or has no
    /// string `reply` field.
    pub fn from_body(body: &str) -> Result<Self, DeliveryError> {
        serde_json::from_str(body).map_err(|e| DeliveryError::Parse(e.to_string()))
    }
}

/// Why a chat message could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The response body was not a `{ "reply": ... }` object.
    #[error("malformed reply: {0}")]
    Parse(String),
}

/// Sends one chat message and waits for the reply.
///
/// Futures are `?Send` because browser fetch futures are bound to the JS
/// event loop thread.
#[async_trait::async_trait(?Send)]
pub trait ChatTransport {
    /// Post `message` to the chatbot backend.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] for network, status, or decode failures.
    async fn send(&self, message: &str) -> Result<ChatReply, DeliveryError>;
}

/// Browser transport backed by `fetch` through `gloo-net`.
#[cfg(feature = "hydrate")]
#[derive(Clone, Debug)]
pub struct FetchTransport {
    endpoint: String,
}

#[cfg(feature = "hydrate")]
impl FetchTransport {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self { endpoint: endpoint.into() }
    }
}

#[cfg(feature = "hydrate")]
impl Default for FetchTransport {
    fn default() -> Self {
        Self::new(CHATBOT_ENDPOINT)
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl ChatTransport for FetchTransport {
    async fn send(&self, message: &str) -> Result<ChatReply, DeliveryError> {
        let body = ChatRequest { message: message.to_owned() };
        // `.json()` sets `Content-Type: application/json`.
        let resp = gloo_net::http::Request::post(&self.endpoint)
            .json(&body)
            .map_err(|e| DeliveryError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(DeliveryError::Status(resp.status()));
        }
        let text = resp
            .text()
            .await
            .map_err(|e| DeliveryError::Network(e.to_string()))?;
        ChatReply::from_body(&text)
    }
}
