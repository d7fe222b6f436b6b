//! Request shaping for the chat completions endpoint
//!
//! Pure transforms from configuration plus conversation history to the
//! outbound request parts. No I/O and no failure modes; malformed input is
//! the caller's responsibility.

use crate::protocol::ChatMessage;
use crate::providers::ProviderConfig;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use super::types::WireRequest;

/// Build the request body: model, pass-through parameters, the message
/// history, and the streaming flag fixed to true.
pub fn to_wire_request(config: &ProviderConfig, messages: &[ChatMessage]) -> WireRequest {
    WireRequest {
        model: config.model.clone(),
        messages: messages.to_vec(),
        stream: true,
        params: config.params.clone(),
    }
}

/// Build request headers: JSON content type and bearer authentication.
pub fn build_headers(api_key: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    // A key containing non-header bytes cannot authenticate anyway; the
    // request then fails at the server with a transport error.
    headers.insert(
        AUTHORIZATION,
        format!("Bearer {}", api_key)
            .parse()
            .unwrap_or_else(|_| HeaderValue::from_static("Bearer invalid")),
    );

    headers
}
