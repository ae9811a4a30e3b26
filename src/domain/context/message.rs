//! Transcript messages.
//!
//! A conversation transcript is an append-only list of `(role, content)`
//! pairs. The whole list is stored as one JSON array, so the serialized shape
//! here is also the storage format.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Inbound message from the end user.
    User,
    /// Reply or greeting produced by the relay.
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::System => "system",
        }
    }
}

/// One transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageRole::User, content)
    }

    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageRole::System, content)
    }
}

/// Renders a transcript as `"<role>: <content>"` lines in transcript order.
pub fn format_transcript(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_role_before_content() {
        let json = serde_json::to_string(&vec![Message::user("Hello")]).unwrap();
        assert_eq!(json, r#"[{"role":"user","content":"Hello"}]"#);
    }

    #[test]
    fn rejects_unknown_roles() {
        let parsed: Result<Message, _> =
            serde_json::from_str(r#"{"role":"assistant","content":"x"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn transcript_is_one_line_per_message() {
        let messages = vec![
            Message::user("Hi"),
            Message::system("Hello! How can I help?"),
            Message::user("I feel stuck"),
        ];
        assert_eq!(
            format_transcript(&messages),
            "user: Hi\nsystem: Hello! How can I help?\nuser: I feel stuck"
        );
    }

    #[test]
    fn empty_transcript_is_empty_string() {
        assert_eq!(format_transcript(&[]), "");
    }
}
