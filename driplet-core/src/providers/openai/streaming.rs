//! Async read loop driving the incremental decoder
//!
//! One session owns one sequential loop: the byte-source read is the only
//! suspension point; everything between two reads is synchronous. The loop
//! is generic over the byte source so tests can inject fake streams.

use crate::protocol::ChatMessage;
use crate::providers::error::{ProviderError, ProviderResult};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use super::decode::{DeltaDecoder, StreamHandler};

/// Drive `stream` to exhaustion through a fresh [`DeltaDecoder`].
///
/// On clean exhaustion, calls `handler.on_close(started_at_ms)` once and
/// returns the assembled message. On cancellation or any fatal decode or
/// transport error, returns the error without calling `on_close`.
pub async fn decode_stream<S, E, H>(
    mut stream: S,
    handler: &mut H,
    cancel: &CancellationToken,
    started_at_ms: i64,
) -> ProviderResult<ChatMessage>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
    E: Into<ProviderError>,
    H: StreamHandler,
{
    let mut decoder = DeltaDecoder::new();

    loop {
        tokio::select! {
            // Check cancellation before reading, so an already-fired token
            // never decodes another chunk.
            biased;

            _ = cancel.cancelled() => {
                tracing::debug!("stream cancelled by caller");
                return Err(ProviderError::Cancelled);
            }

            next = stream.next() => match next {
                Some(Ok(chunk)) => decoder.feed(&chunk, handler)?,
                Some(Err(e)) => {
                    // A source torn down by cancellation surfaces as the
                    // cancellation outcome, not a transport fault.
                    if cancel.is_cancelled() {
                        return Err(ProviderError::Cancelled);
                    }
                    return Err(e.into());
                }
                None => break,
            },
        }
    }

    handler.on_close(started_at_ms);
    Ok(decoder.finish())
}
