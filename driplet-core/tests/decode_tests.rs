//! Decoder property tests
//!
//! The central guarantee under test: chunk boundaries are meaningless.
//! However a byte stream is fragmented, the decoder emits the same
//! callback sequence and assembles the same final message.

use driplet_core::{ChatMessage, DeltaDecoder, StreamHandler};
use proptest::prelude::*;
use test_case::test_case;

/// Records every callback for assertion
#[derive(Default)]
struct Recorder {
    chunks: Vec<(String, String)>,
}

impl StreamHandler for Recorder {
    fn on_chunk(&mut self, content_delta: &str, role_delta: &str) {
        self.chunks
            .push((content_delta.to_string(), role_delta.to_string()));
    }

    fn on_close(&mut self, _started_at_ms: i64) {}
}

/// A transcript exercising role deltas, multi-byte content, and the sentinel
const BODY: &str = concat!(
    "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\"H\u{e9}llo \u{1F30A}\"}}]}\n\n",
    "data: {\"choices\":[{\"delta\":{\"content\":\" w\u{f6}rld\"}}]}\n\n",
    "data: [DONE]\n\n",
);

/// Feed `body` split at the given byte offsets, returning the callback
/// transcript and the assembled message.
fn decode_with_splits(body: &[u8], splits: &[usize]) -> (Vec<(String, String)>, ChatMessage) {
    let mut decoder = DeltaDecoder::new();
    let mut rec = Recorder::default();

    let mut start = 0;
    for &split in splits {
        decoder.feed(&body[start..split], &mut rec).unwrap();
        start = split;
    }
    decoder.feed(&body[start..], &mut rec).unwrap();

    (rec.chunks, decoder.finish())
}

#[test]
fn role_then_content_then_sentinel_transcript() {
    let (chunks, message) = decode_with_splits(
        concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"Hi\"}}]}\n\n",
            "data: [DONE]\n\n",
        )
        .as_bytes(),
        &[],
    );

    assert_eq!(
        chunks,
        vec![
            ("".to_string(), "assistant".to_string()),
            ("Hi".to_string(), "".to_string()),
        ]
    );
    assert_eq!(message, ChatMessage::new("assistant", "Hi"));
}

// One byte at a time is the worst-case fragmentation
#[test]
fn byte_at_a_time_matches_one_shot() {
    let baseline = decode_with_splits(BODY.as_bytes(), &[]);
    let splits: Vec<usize> = (1..BODY.len()).collect();
    assert_eq!(decode_with_splits(BODY.as_bytes(), &splits), baseline);
}

#[test_case(&[1] ; "inside the data marker")]
#[test_case(&[20] ; "inside the first json payload")]
#[test_case(&[51] ; "straddling the frame boundary")]
#[test_case(&[94] ; "inside a two-byte character")]
#[test_case(&[100, 101] ; "inside a four-byte character")]
fn named_split_points_match_one_shot(splits: &[usize]) {
    let baseline = decode_with_splits(BODY.as_bytes(), &[]);
    assert_eq!(decode_with_splits(BODY.as_bytes(), splits), baseline);
}

proptest! {
    /// For any set of split points, including mid-character ones, the
    /// decode result is identical to delivering the body as one chunk.
    #[test]
    fn arbitrary_splits_match_one_shot(
        mut splits in prop::collection::vec(0..BODY.len(), 0..8)
    ) {
        splits.sort_unstable();
        let baseline = decode_with_splits(BODY.as_bytes(), &[]);
        prop_assert_eq!(decode_with_splits(BODY.as_bytes(), &splits), baseline);
    }

    /// K well-formed frames followed by the sentinel produce exactly K
    /// callbacks and a final content equal to the delta concatenation.
    #[test]
    fn k_frames_k_callbacks(deltas in prop::collection::vec("[a-z ]{0,12}", 0..10)) {
        let mut body = String::new();
        for delta in &deltas {
            body.push_str(&format!(
                "data: {}\n\n",
                serde_json::json!({"choices":[{"delta":{"content": delta}}]})
            ));
        }
        body.push_str("data: [DONE]\n\n");

        let (chunks, message) = decode_with_splits(body.as_bytes(), &[]);
        prop_assert_eq!(chunks.len(), deltas.len());
        prop_assert_eq!(message.content, deltas.concat());
    }
}
