//! Incremental decoding of the delta event stream
//!
//! The decoder owns all per-session state: the undecoded byte tail, the
//! text buffer of not-yet-complete frames, and the running content/role
//! accumulators. Feed it byte chunks in arrival order; it finds frame
//! boundaries, parses delta payloads, and drives the caller's handler once
//! per frame. Chunk boundaries carry no meaning: the same input produces
//! the same events no matter how it is fragmented, including splits inside
//! a multi-byte character or inside the `data:` marker itself.

use std::borrow::Cow;

use crate::protocol::ChatMessage;
use crate::providers::error::{ProviderError, ProviderResult};

use super::types::StreamChunk;

/// Sentinel payload signaling the producer will send no further deltas
const TERMINAL_MARKER: &str = "[DONE]";

/// Event boundary: a blank line between frames
const FRAME_BOUNDARY: &str = "\n\n";

/// Callbacks driven by one streaming session.
pub trait StreamHandler {
    /// Called once per decoded frame, synchronously and in arrival order,
    /// with the content and role deltas. Either delta may be empty; a frame
    /// whose payload parses but carries no fields still produces one call.
    fn on_chunk(&mut self, content_delta: &str, role_delta: &str);

    /// Called exactly once after the byte source is exhausted, and never
    /// after a fatal failure. `started_at_ms` is the wall-clock millisecond
    /// timestamp recorded immediately before the request was issued.
    fn on_close(&mut self, started_at_ms: i64);
}

/// Session-scoped incremental decoder.
///
/// One instance per session; it must live for the whole session so that a
/// multi-byte character split across chunk boundaries is reassembled from
/// the retained byte tail rather than lost.
#[derive(Debug, Default)]
pub struct DeltaDecoder {
    /// Byte tail that does not yet end on a UTF-8 character boundary
    pending: Vec<u8>,
    /// Decoded text that has not yet formed a complete frame
    buffer: String,
    /// Running concatenation of content deltas
    content: String,
    /// Running concatenation of role deltas
    role: String,
}

impl DeltaDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk of bytes, invoking `handler.on_chunk` once per
    /// complete frame found. A malformed delta payload or invalid UTF-8 is
    /// fatal for the session; no further feeding is meaningful afterwards.
    pub fn feed<H: StreamHandler>(
        &mut self,
        chunk: &[u8],
        handler: &mut H,
    ) -> ProviderResult<()> {
        self.pending.extend_from_slice(chunk);
        self.decode_pending()?;

        while let Some(pos) = self.buffer.find(FRAME_BOUNDARY) {
            let frame: String = self.buffer.drain(..pos + FRAME_BOUNDARY.len()).collect();
            self.process_frame(&frame[..pos], handler)?;
        }

        Ok(())
    }

    /// End the session, returning the assembled message.
    ///
    /// Any unterminated trailing frame still in the buffer is dropped
    /// unparsed; a well-behaved producer ends with the terminal marker, so
    /// a leftover remainder is either noise or a truncated stream the
    /// producer never finished.
    pub fn finish(self) -> ChatMessage {
        ChatMessage {
            role: self.role,
            content: self.content,
        }
    }

    /// Move the longest valid UTF-8 prefix of `pending` into the text
    /// buffer, keeping an incomplete trailing sequence for the next chunk.
    fn decode_pending(&mut self) -> ProviderResult<()> {
        match std::str::from_utf8(&self.pending) {
            Ok(text) => {
                self.buffer.push_str(text);
                self.pending.clear();
            }
            Err(e) => {
                // error_len is Some for genuinely invalid bytes, None for a
                // sequence that may still be completed by the next chunk.
                if e.error_len().is_some() {
                    return Err(ProviderError::Protocol(
                        "invalid UTF-8 in stream".to_string(),
                    ));
                }
                let valid_up_to = e.valid_up_to();
                if let Ok(text) = std::str::from_utf8(&self.pending[..valid_up_to]) {
                    self.buffer.push_str(text);
                }
                self.pending.drain(..valid_up_to);
            }
        }
        Ok(())
    }

    fn process_frame<H: StreamHandler>(
        &mut self,
        frame: &str,
        handler: &mut H,
    ) -> ProviderResult<()> {
        // Strip the field marker (tolerating a stray leading newline) and
        // surrounding whitespace.
        let payload = frame.trim();
        let payload = payload.strip_prefix("data:").map(str::trim).unwrap_or(payload);

        // Keep-alive frame
        if payload.is_empty() {
            return Ok(());
        }

        // The sentinel ends the payload sequence but not the session; the
        // read loop keeps going until the source itself is exhausted.
        if payload == TERMINAL_MARKER {
            return Ok(());
        }

        let chunk: StreamChunk = serde_json::from_str(payload).map_err(|e| {
            ProviderError::Protocol(format!("malformed delta payload: {}", e))
        })?;

        let content_delta = normalize_code_fence(chunk.content_delta());
        let role_delta = chunk.role_delta();

        self.content.push_str(&content_delta);
        self.role.push_str(role_delta);
        handler.on_chunk(&content_delta, role_delta);

        Ok(())
    }
}

/// Collapse whitespace separating a leading backtick from the text that
/// follows, so a code fence renders attached to its content.
fn normalize_code_fence(delta: &str) -> Cow<'_, str> {
    if let Some(rest) = delta.strip_prefix('`') {
        if rest.starts_with(char::is_whitespace) {
            return Cow::Owned(format!("`{}", rest.trim_start()));
        }
    }
    Cow::Borrowed(delta)
}
