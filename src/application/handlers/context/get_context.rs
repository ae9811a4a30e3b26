//! GetContext query handler.
//!
//! Materializes every conversation of both flows for a user, whichever flow
//! is active. This is the only read path that reaches conversations other
//! than the tail one.

use crate::application::{ContextError, ConversationStore};
use crate::domain::context::{Flow, Message};
use crate::domain::foundation::{ConversationId, UserId};

use super::validation::require_non_empty;

/// Query for a user's full context.
#[derive(Debug, Clone)]
pub struct GetContextQuery {
    pub user_id: String,
}

impl GetContextQuery {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// One stored conversation with its transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTranscript {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

/// Conversations of both flows, each in conversation-list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowContexts {
    pub normal: Vec<ConversationTranscript>,
    pub check_in: Vec<ConversationTranscript>,
}

impl FlowContexts {
    fn slot_mut(&mut self, flow: Flow) -> &mut Vec<ConversationTranscript> {
        match flow {
            Flow::Normal => &mut self.normal,
            Flow::CheckIn => &mut self.check_in,
        }
    }
}

/// A user's full context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub user_id: UserId,
    pub active_flow: Flow,
    pub contexts: FlowContexts,
}

/// Handler for GetContext queries.
#[derive(Clone)]
pub struct GetContextHandler {
    store: ConversationStore,
}

impl GetContextHandler {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetContextQuery) -> Result<UserContext, ContextError> {
        require_non_empty(&[("userId", &query.user_id)])?;
        let user_id = UserId::new(query.user_id)?;

        let active_flow = self.store.get_active_flow(&user_id).await?;

        let mut contexts = FlowContexts::default();
        for flow in Flow::ALL {
            let ids = self.store.list_conversation_ids(&user_id, flow).await?;
            let slot = contexts.slot_mut(flow);
            for conversation_id in ids {
                let messages = self
                    .store
                    .load_messages(&user_id, flow, &conversation_id)
                    .await?;
                slot.push(ConversationTranscript {
                    conversation_id,
                    messages,
                });
            }
        }

        Ok(UserContext {
            user_id,
            active_flow,
            contexts,
        })
    }
}
