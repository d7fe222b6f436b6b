//! Protocol module for chat message structures
//!
//! This module defines the canonical data model shared by the request side
//! (conversation history) and the response side (the assembled message a
//! streaming session produces).

pub mod types;

pub use types::ChatMessage;
