//! OpenAI API wire types
//!
//! These types match the OpenAI chat completions format and are used for
//! serialization/deserialization when communicating with the server.

use crate::protocol::ChatMessage;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outbound chat completion request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireRequest {
    pub model: String,

    pub messages: Vec<ChatMessage>,

    /// Always true: this client only speaks the streaming variant
    pub stream: bool,

    /// Pass-through provider parameters, flattened into the body
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// One parsed delta payload from the event stream.
///
/// Every field tolerates absence: a chunk with no recognizable delta still
/// counts as one event carrying empty deltas.
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

/// One choice within a stream chunk
#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: StreamDelta,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Incremental message fragment
#[derive(Debug, Default, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

impl StreamChunk {
    /// Content delta of the first choice, empty when absent
    pub fn content_delta(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.delta.content.as_deref())
            .unwrap_or("")
    }

    /// Role delta of the first choice, empty when absent
    pub fn role_delta(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.delta.role.as_deref())
            .unwrap_or("")
    }
}

/// Error body the server may return alongside a non-success status
#[derive(Debug, Deserialize)]
pub struct WireError {
    pub error: WireErrorDetail,
}

/// Error detail within [`WireError`]
#[derive(Debug, Deserialize)]
pub struct WireErrorDetail {
    pub message: String,

    #[serde(rename = "type")]
    pub error_type: Option<String>,
}
