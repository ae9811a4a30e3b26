//! Strongly-typed identifier value objects.
//!
//! Both identifiers end up as segments of colon-delimited store keys, so
//! neither may be empty or contain the `:` delimiter.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::ValidationError;

/// Key-space delimiter shared with [`crate::domain::context::ContextKey`].
pub const KEY_DELIMITER: char = ':';

/// Segment names that already carry meaning in the key space.
const RESERVED_CONVERSATION_SEGMENTS: [&str; 2] = ["conversations", "activeFlow"];

fn check_segment(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.contains(KEY_DELIMITER) {
        return Err(ValidationError::invalid_format(
            field,
            format!("must not contain '{}'", KEY_DELIMITER),
        ));
    }
    Ok(())
}

/// Opaque identifier of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId, returning error if empty or not key-safe.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        check_segment("userId", &id)?;
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Identifier of a conversation within a (user, flow) namespace.
///
/// Freshly created conversations get a v4 UUID, but ids read back from the
/// store or supplied by clients are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a new random ConversationId.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing id, returning error if empty, reserved or not key-safe.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        check_segment("conversationId", &id)?;
        if RESERVED_CONVERSATION_SEGMENTS.contains(&id.as_str()) {
            return Err(ValidationError::invalid_format(
                "conversationId",
                format!("'{}' is reserved", id),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ConversationId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ConversationId> for String {
    fn from(id: ConversationId) -> Self {
        id.0
    }
}
