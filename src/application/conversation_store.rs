//! Conversation store.
//!
//! Maps the user -> flow -> conversation -> messages hierarchy onto
//! key/value operations. Every call is a fresh round trip; nothing is cached.

use std::sync::Arc;

use crate::domain::context::{ContextKey, Flow, Message, MESSAGES_FIELD};
use crate::domain::foundation::{ConversationId, UserId};
use crate::ports::KeyValueStore;

use super::ContextError;

/// Typed access to the context key space.
#[derive(Clone)]
pub struct ConversationStore {
    store: Arc<dyn KeyValueStore>,
}

impl ConversationStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Reads the user's active flow, `Flow::Normal` when unset.
    ///
    /// A stored value outside the two known flows also resolves to
    /// `Flow::Normal`.
    pub async fn get_active_flow(&self, user_id: &UserId) -> Result<Flow, ContextError> {
        let key = ContextKey::active_flow(user_id).to_string();
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(Flow::default());
        };
        match raw.parse::<Flow>() {
            Ok(flow) => Ok(flow),
            Err(_) => {
                tracing::warn!(key = %key, value = %raw, "Unrecognised active flow, using default");
                Ok(Flow::default())
            }
        }
    }

    /// Overwrites the user's active flow.
    pub async fn set_active_flow(&self, user_id: &UserId, flow: Flow) -> Result<(), ContextError> {
        let key = ContextKey::active_flow(user_id).to_string();
        self.store.set(&key, flow.as_str()).await?;
        Ok(())
    }

    /// All conversation ids of a flow, in insertion order.
    pub async fn list_conversation_ids(
        &self,
        user_id: &UserId,
        flow: Flow,
    ) -> Result<Vec<ConversationId>, ContextError> {
        let key = ContextKey::conversations(user_id, flow).to_string();
        let raw = self.store.list_range(&key, 0, -1).await?;
        raw.into_iter().map(|id| decode_conversation_id(&key, id)).collect()
    }

    /// The most recently appended conversation id of a flow.
    pub async fn tail_conversation_id(
        &self,
        user_id: &UserId,
        flow: Flow,
    ) -> Result<Option<ConversationId>, ContextError> {
        let key = ContextKey::conversations(user_id, flow).to_string();
        let raw = self.store.list_range(&key, -1, -1).await?;
        raw.into_iter()
            .next()
            .map(|id| decode_conversation_id(&key, id))
            .transpose()
    }

    /// Appends a conversation id to the flow's list.
    pub async fn append_conversation_id(
        &self,
        user_id: &UserId,
        flow: Flow,
        conversation_id: &ConversationId,
    ) -> Result<(), ContextError> {
        let key = ContextKey::conversations(user_id, flow).to_string();
        self.store.list_push(&key, conversation_id.as_str()).await?;
        Ok(())
    }

    /// Loads a conversation's transcript, empty when nothing is stored yet.
    pub async fn load_messages(
        &self,
        user_id: &UserId,
        flow: Flow,
        conversation_id: &ConversationId,
    ) -> Result<Vec<Message>, ContextError> {
        let key = ContextKey::conversation(user_id, flow, conversation_id).to_string();
        match self.store.hash_get(&key, MESSAGES_FIELD).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| ContextError::corrupt(&key, e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces a conversation's whole transcript.
    pub async fn save_messages(
        &self,
        user_id: &UserId,
        flow: Flow,
        conversation_id: &ConversationId,
        messages: &[Message],
    ) -> Result<(), ContextError> {
        let json = encode_messages(messages)?;
        self.write_fields(
            user_id,
            flow,
            conversation_id,
            &[(MESSAGES_FIELD.to_string(), json)],
        )
        .await
    }

    /// Writes arbitrary fields into a conversation's field map.
    pub async fn write_fields(
        &self,
        user_id: &UserId,
        flow: Flow,
        conversation_id: &ConversationId,
        fields: &[(String, String)],
    ) -> Result<(), ContextError> {
        let key = ContextKey::conversation(user_id, flow, conversation_id).to_string();
        self.store.hash_set(&key, fields).await?;
        Ok(())
    }
}

/// Serializes a transcript into its stored JSON form.
pub fn encode_messages(messages: &[Message]) -> Result<String, ContextError> {
    serde_json::to_string(messages)
        .map_err(|e| ContextError::corrupt(MESSAGES_FIELD, e.to_string()))
}

fn decode_conversation_id(key: &str, raw: String) -> Result<ConversationId, ContextError> {
    ConversationId::new(raw).map_err(|e| ContextError::corrupt(key, e.to_string()))
}
