//! OpenAI-format chat completions provider
//!
//! This module implements the two halves of one streaming session: shaping
//! the outbound `/chat/completions` request, and incrementally decoding the
//! delta stream the server sends back.

mod client;
mod decode;
pub mod request;
mod streaming;
pub mod types;

pub use client::OpenAIClient;
pub use decode::{DeltaDecoder, StreamHandler};
pub use streaming::decode_stream;
pub use types::{StreamChunk, StreamDelta, WireRequest};
