//! Driplet Core Library
//!
//! This crate provides the core functionality for consuming streaming chat
//! completions: shaping the outbound request and incrementally decoding the
//! chunked, newline-delimited delta stream the provider sends back.

pub mod protocol;
pub mod providers;

pub use protocol::ChatMessage;
pub use providers::openai::{DeltaDecoder, OpenAIClient, StreamHandler};
pub use providers::{ProviderConfig, ProviderError, ProviderResult};

/// Returns the version of the Driplet Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
