//! Provider layer
//!
//! This module holds everything specific to talking to an LLM provider:
//! configuration, error types, and the OpenAI-format client with its
//! incremental stream decoder.

pub mod config;
pub mod error;
pub mod openai;

pub use config::ProviderConfig;
pub use error::{ProviderError, ProviderResult};
