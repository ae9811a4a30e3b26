//! InitiateCheckIn command handler.
//!
//! Switches the user into the check-in flow and opens a brand-new check-in
//! conversation seeded with the greeting. Existing check-in conversations
//! are never reused.
//!
//! Nothing switches a user back to the normal flow afterwards.

use crate::application::{ContextError, ConversationStore};
use crate::domain::context::{Flow, Message, CHECK_IN_GREETING};
use crate::domain::foundation::{ConversationId, UserId};

use super::validation::require_non_empty;

/// Command to start a check-in.
#[derive(Debug, Clone)]
pub struct InitiateCheckInCommand {
    pub user_id: String,
}

impl InitiateCheckInCommand {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }
}

/// Result of starting a check-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitiateCheckInResult {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub greeting: String,
}

/// Handler for InitiateCheckIn commands.
#[derive(Clone)]
pub struct InitiateCheckInHandler {
    store: ConversationStore,
}

impl InitiateCheckInHandler {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: InitiateCheckInCommand,
    ) -> Result<InitiateCheckInResult, ContextError> {
        require_non_empty(&[("userId", &cmd.user_id)])?;
        let user_id = UserId::new(cmd.user_id)?;

        self.store.set_active_flow(&user_id, Flow::CheckIn).await?;

        let conversation_id = ConversationId::generate();
        self.store
            .append_conversation_id(&user_id, Flow::CheckIn, &conversation_id)
            .await?;
        self.store
            .save_messages(
                &user_id,
                Flow::CheckIn,
                &conversation_id,
                &[Message::system(CHECK_IN_GREETING)],
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            conversation_id = %conversation_id,
            "Check-in initiated"
        );

        Ok(InitiateCheckInResult {
            user_id,
            conversation_id,
            greeting: CHECK_IN_GREETING.to_string(),
        })
    }
}
