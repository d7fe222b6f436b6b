//! OpenAI-format client implementation

use crate::protocol::ChatMessage;
use crate::providers::error::{ProviderError, ProviderResult};
use crate::providers::ProviderConfig;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::decode::StreamHandler;
use super::request::{build_headers, to_wire_request};
use super::streaming::decode_stream;
use super::types::WireError;

/// Client for the streaming chat completions endpoint.
///
/// Holds a shared connection pool; one `stream_chat` call is one session.
/// Sessions may run concurrently on clones of the client, each owning its
/// own decoder state.
#[derive(Clone)]
pub struct OpenAIClient {
    config: ProviderConfig,
    client: Client,
}

impl OpenAIClient {
    /// Create a new client from configuration
    pub fn new(config: ProviderConfig) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                ProviderError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Run one streaming session: issue the request, decode the response
    /// stream to exhaustion, and return the assembled message.
    ///
    /// `handler.on_chunk` fires once per delta frame; `handler.on_close`
    /// fires once on clean exhaustion with the wall-clock timestamp taken
    /// just before the request went out. One decode attempt per invocation;
    /// nothing is retried.
    pub async fn stream_chat<H: StreamHandler>(
        &self,
        messages: &[ChatMessage],
        handler: &mut H,
        cancel: CancellationToken,
    ) -> ProviderResult<ChatMessage> {
        let started_at_ms = Utc::now().timestamp_millis();

        let wire = to_wire_request(&self.config, messages);
        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(model = %wire.model, %url, "issuing streaming chat request");

        let request = self
            .client
            .post(&url)
            .headers(build_headers(&self.config.api_key))
            .json(&wire);

        let response = tokio::select! {
            biased;

            _ = cancel.cancelled() => return Err(ProviderError::Cancelled),
            resp = request.send() => resp?,
        };

        let status = response.status();
        debug!(status = status.as_u16(), "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Transport {
                status: status.as_u16(),
                message: describe_error_body(body),
            });
        }

        decode_stream(Box::pin(response.bytes_stream()), handler, &cancel, started_at_ms).await
    }
}

/// Prefer the provider's structured error message when the body carries one
fn describe_error_body(body: String) -> String {
    match serde_json::from_str::<WireError>(&body) {
        Ok(wire) => wire.error.message,
        Err(_) => body,
    }
}
