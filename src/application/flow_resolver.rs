//! Flow resolution for inbound messages.
//!
//! Picks the (flow, conversation) an ordinary message lands in: the user's
//! active flow and the tail conversation of that flow, creating one when
//! the flow has none.
//!
//! Reading the tail and appending a new id are two separate store calls.
//! Two concurrent first messages for the same user and flow can therefore
//! both create a conversation; the later append becomes the tail.

use crate::domain::context::{Flow, Message};
use crate::domain::foundation::{ConversationId, UserId};

use super::{ContextError, ConversationStore};

/// Where an inbound message goes, plus the transcript so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConversation {
    pub flow: Flow,
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
    /// True when the conversation was created by this resolution.
    pub created: bool,
}

#[derive(Clone)]
pub struct FlowResolver {
    store: ConversationStore,
}

impl FlowResolver {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, user_id: &UserId) -> Result<ResolvedConversation, ContextError> {
        let flow = self.store.get_active_flow(user_id).await?;

        match self.store.tail_conversation_id(user_id, flow).await? {
            Some(conversation_id) => {
                let messages = self
                    .store
                    .load_messages(user_id, flow, &conversation_id)
                    .await?;
                tracing::debug!(
                    user_id = %user_id,
                    flow = %flow,
                    conversation_id = %conversation_id,
                    "Resolved tail conversation"
                );
                Ok(ResolvedConversation {
                    flow,
                    conversation_id,
                    messages,
                    created: false,
                })
            }
            None => {
                let conversation_id = ConversationId::generate();
                self.store
                    .append_conversation_id(user_id, flow, &conversation_id)
                    .await?;
                tracing::debug!(
                    user_id = %user_id,
                    flow = %flow,
                    conversation_id = %conversation_id,
                    "Started new conversation"
                );
                Ok(ResolvedConversation {
                    flow,
                    conversation_id,
                    messages: Vec::new(),
                    created: true,
                })
            }
        }
    }
}
