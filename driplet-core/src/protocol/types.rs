//! Core protocol types for chat interactions
//!
//! The same structure serves two purposes: entries in the conversation
//! history sent with a request, and the final message assembled from a
//! streaming session. Roles are free-form short strings rather than an
//! enum because a streamed role is accumulated from deltas and may, in
//! principle, arrive in fragments.

use serde::{Deserialize, Serialize};

/// A chat message: a role tag plus text content.
///
/// When returned from a streaming session, `role` and `content` are the
/// concatenation of every role and content delta seen, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender ("user", "assistant", "system", or empty)
    pub role: String,

    /// Text content of the message
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(ChatMessage::user("hi").role, "user");
        assert_eq!(ChatMessage::assistant("hi").role, "assistant");
        assert_eq!(ChatMessage::system("hi").role, "system");
        assert_eq!(ChatMessage::system("be brief").content, "be brief");
    }

    #[test]
    fn test_serialization_shape() {
        let json = serde_json::to_value(ChatMessage::user("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"role": "user", "content": "hello"}));
    }
}
