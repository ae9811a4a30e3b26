//! Typed key builder for the context key space.
//!
//! | Key | Store shape |
//! |---|---|
//! | `context:{userId}:activeFlow` | scalar flow name |
//! | `context:{userId}:{flow}:conversations` | list of conversation ids |
//! | `context:{userId}:{flow}:{conversationId}` | hash with a `messages` field |
//!
//! All key strings are produced here. Identifiers are validated to be free
//! of the delimiter, which keeps rendering injective.

use std::fmt;

use super::Flow;
use crate::domain::foundation::{ConversationId, UserId, KEY_DELIMITER};

const NAMESPACE: &str = "context";
const ACTIVE_FLOW_SEGMENT: &str = "activeFlow";
const CONVERSATIONS_SEGMENT: &str = "conversations";

/// Hash field holding the JSON-encoded message list of a conversation.
pub const MESSAGES_FIELD: &str = "messages";

/// A key in the context key space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContextKey {
    /// The user's active-flow pointer.
    ActiveFlow { user_id: UserId },
    /// Insertion-ordered conversation ids of one flow.
    Conversations { user_id: UserId, flow: Flow },
    /// Field map of one conversation.
    Conversation {
        user_id: UserId,
        flow: Flow,
        conversation_id: ConversationId,
    },
}

impl ContextKey {
    pub fn active_flow(user_id: &UserId) -> Self {
        ContextKey::ActiveFlow {
            user_id: user_id.clone(),
        }
    }

    pub fn conversations(user_id: &UserId, flow: Flow) -> Self {
        ContextKey::Conversations {
            user_id: user_id.clone(),
            flow,
        }
    }

    pub fn conversation(user_id: &UserId, flow: Flow, conversation_id: &ConversationId) -> Self {
        ContextKey::Conversation {
            user_id: user_id.clone(),
            flow,
            conversation_id: conversation_id.clone(),
        }
    }

    /// Parses a rendered key back into its typed form.
    ///
    /// Returns `None` for strings outside the context key space.
    pub fn parse(key: &str) -> Option<Self> {
        let segments: Vec<&str> = key.split(KEY_DELIMITER).collect();
        match segments.as_slice() {
            [NAMESPACE, user, ACTIVE_FLOW_SEGMENT] => Some(ContextKey::ActiveFlow {
                user_id: UserId::new(*user).ok()?,
            }),
            [NAMESPACE, user, flow, CONVERSATIONS_SEGMENT] => Some(ContextKey::Conversations {
                user_id: UserId::new(*user).ok()?,
                flow: flow.parse().ok()?,
            }),
            [NAMESPACE, user, flow, conversation] => Some(ContextKey::Conversation {
                user_id: UserId::new(*user).ok()?,
                flow: flow.parse().ok()?,
                conversation_id: ConversationId::new(*conversation).ok()?,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = KEY_DELIMITER;
        match self {
            ContextKey::ActiveFlow { user_id } => {
                write!(f, "{NAMESPACE}{d}{user_id}{d}{ACTIVE_FLOW_SEGMENT}")
            }
            ContextKey::Conversations { user_id, flow } => {
                write!(f, "{NAMESPACE}{d}{user_id}{d}{flow}{d}{CONVERSATIONS_SEGMENT}")
            }
            ContextKey::Conversation {
                user_id,
                flow,
                conversation_id,
            } => write!(f, "{NAMESPACE}{d}{user_id}{d}{flow}{d}{conversation_id}"),
        }
    }
}
