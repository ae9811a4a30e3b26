//! SendMessage command handler.
//!
//! Runs one full exchange: resolve the target conversation, append the
//! user message, classify it, pick and produce a reply, append the reply and
//! persist the whole transcript.
//!
//! The transcript is read and rewritten without any lock, so concurrent
//! sends to the same conversation can lose an exchange.

use crate::application::{ContextError, FlowResolver, LanguageModelGateway, ConversationStore};
use crate::domain::context::{format_transcript, Flow, Message, ReplyPolicy};
use crate::domain::foundation::{ConversationId, UserId};

use super::validation::require_non_empty;

/// Command to send a user message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub user_id: String,
    pub content: String,
}

impl SendMessageCommand {
    pub fn new(user_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            content: content.into(),
        }
    }
}

/// Result of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMessageResult {
    pub user_id: UserId,
    pub flow: Flow,
    pub conversation_id: ConversationId,
    pub category: String,
    pub reply: String,
}

/// Handler for SendMessage commands.
#[derive(Clone)]
pub struct SendMessageHandler {
    store: ConversationStore,
    resolver: FlowResolver,
    gateway: LanguageModelGateway,
}

impl SendMessageHandler {
    pub fn new(store: ConversationStore, gateway: LanguageModelGateway) -> Self {
        Self {
            resolver: FlowResolver::new(store.clone()),
            store,
            gateway,
        }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, ContextError> {
        require_non_empty(&[("userId", &cmd.user_id), ("message", &cmd.content)])?;
        let user_id = UserId::new(cmd.user_id)?;

        let resolved = self.resolver.resolve(&user_id).await?;
        let mut messages = resolved.messages;
        messages.push(Message::user(cmd.content.as_str()));

        let category = self.gateway.classify(&cmd.content).await?;
        let reply = self.reply_for(&category, &messages).await?;
        messages.push(Message::system(reply.as_str()));

        self.store
            .save_messages(&user_id, resolved.flow, &resolved.conversation_id, &messages)
            .await?;

        Ok(SendMessageResult {
            user_id,
            flow: resolved.flow,
            conversation_id: resolved.conversation_id,
            category,
            reply,
        })
    }

    async fn reply_for(&self, category: &str, messages: &[Message]) -> Result<String, ContextError> {
        let policy = ReplyPolicy::for_category(category);
        tracing::debug!(category = %category, policy = ?policy, "Selected reply policy");
        match policy.fixed_reply() {
            Some(text) => Ok(text.to_string()),
            None => Ok(self.gateway.generate(&format_transcript(messages)).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::domain::context::{CRISIS_MESSAGE, FAQ_REDIRECT_MESSAGE};
    use crate::domain::foundation::ValidationError;
    use crate::ports::{AIError, KeyValueStore};
    use std::sync::Arc;

    struct Fixture {
        kv: Arc<InMemoryKeyValueStore>,
        provider: MockAIProvider,
        store: ConversationStore,
        handler: SendMessageHandler,
    }

    fn fixture(provider: MockAIProvider) -> Fixture {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = ConversationStore::new(kv.clone());
        let gateway = LanguageModelGateway::new(Arc::new(provider.clone()));
        Fixture {
            handler: SendMessageHandler::new(store.clone(), gateway),
            kv,
            provider,
            store,
        }
    }

    fn user() -> UserId {
        UserId::new("123").unwrap()
    }

    #[tokio::test]
    async fn first_message_creates_conversation_with_generated_reply() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("general")
                .with_response("System response"),
        );

        let result = f
            .handler
            .handle(SendMessageCommand::new("123", "Hello"))
            .await
            .unwrap();

        assert_eq!(result.flow, Flow::Normal);
        assert_eq!(result.category, "general");
        assert_eq!(result.reply, "System response");

        let ids = f.store.list_conversation_ids(&user(), Flow::Normal).await.unwrap();
        assert_eq!(ids, vec![result.conversation_id.clone()]);
        assert_eq!(
            f.store
                .load_messages(&user(), Flow::Normal, &result.conversation_id)
                .await
                .unwrap(),
            vec![Message::user("Hello"), Message::system("System response")]
        );
    }

    #[tokio::test]
    async fn appends_to_existing_tail_conversation() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("general")
                .with_response("System response"),
        );
        let existing = ConversationId::new("conversation-id-1").unwrap();
        f.store
            .append_conversation_id(&user(), Flow::Normal, &existing)
            .await
            .unwrap();
        f.store
            .save_messages(&user(), Flow::Normal, &existing, &[Message::user("Hi")])
            .await
            .unwrap();

        let result = f
            .handler
            .handle(SendMessageCommand::new("123", "Hello"))
            .await
            .unwrap();

        assert_eq!(result.conversation_id, existing);
        assert_eq!(
            f.kv
                .hash_get("context:123:normal:conversation-id-1", "messages")
                .await
                .unwrap()
                .unwrap(),
            r#"[{"role":"user","content":"Hi"},{"role":"user","content":"Hello"},{"role":"system","content":"System response"}]"#
        );
    }

    #[tokio::test]
    async fn generation_prompt_contains_whole_transcript() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("general")
                .with_response("reply"),
        );
        let existing = ConversationId::new("c1").unwrap();
        f.store
            .append_conversation_id(&user(), Flow::Normal, &existing)
            .await
            .unwrap();
        f.store
            .save_messages(
                &user(),
                Flow::Normal,
                &existing,
                &[Message::user("Hi"), Message::system("Hello!")],
            )
            .await
            .unwrap();

        f.handler
            .handle(SendMessageCommand::new("123", "I feel low"))
            .await
            .unwrap();

        let calls = f.provider.get_calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].messages[0]
            .content
            .contains("user: Hi\nsystem: Hello!\nuser: I feel low"));
    }

    #[tokio::test]
    async fn second_send_reuses_conversation() {
        let f = fixture(MockAIProvider::new());

        let first = f
            .handler
            .handle(SendMessageCommand::new("123", "Hello"))
            .await
            .unwrap();
        let second = f
            .handler
            .handle(SendMessageCommand::new("123", "Again"))
            .await
            .unwrap();

        assert_eq!(first.conversation_id, second.conversation_id);
        assert_eq!(
            f.store
                .load_messages(&user(), Flow::Normal, &first.conversation_id)
                .await
                .unwrap()
                .len(),
            4
        );
    }

    #[tokio::test]
    async fn crisis_category_skips_generation() {
        let f = fixture(MockAIProvider::new().with_response("Suicide Risk"));

        let result = f
            .handler
            .handle(SendMessageCommand::new("123", "I can't go on"))
            .await
            .unwrap();

        assert_eq!(result.reply, CRISIS_MESSAGE);
        assert_eq!(f.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn faq_category_skips_generation() {
        let f = fixture(MockAIProvider::new().with_response("faq"));

        let result = f
            .handler
            .handle(SendMessageCommand::new("123", "Is this anonymous?"))
            .await
            .unwrap();

        assert_eq!(result.reply, FAQ_REDIRECT_MESSAGE);
        assert_eq!(f.provider.call_count(), 1);
    }

    #[tokio::test]
    async fn lands_in_check_in_flow_when_active() {
        let f = fixture(MockAIProvider::new());
        f.store.set_active_flow(&user(), Flow::CheckIn).await.unwrap();

        let result = f
            .handler
            .handle(SendMessageCommand::new("123", "Fine, thanks"))
            .await
            .unwrap();

        assert_eq!(result.flow, Flow::CheckIn);
        assert!(f
            .store
            .list_conversation_ids(&user(), Flow::Normal)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn missing_fields_fail_before_store_access() {
        let f = fixture(MockAIProvider::new());

        let err = f
            .handler
            .handle(SendMessageCommand::new("", ""))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContextError::Validation(ValidationError::MissingFields { ref fields })
                if fields == &["userId".to_string(), "message".to_string()]
        ));
        assert_eq!(f.kv.operation_count(), 0);
        assert_eq!(f.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn classification_failure_persists_nothing() {
        let f = fixture(MockAIProvider::new().with_error(AIError::network("reset")));

        let err = f
            .handler
            .handle(SendMessageCommand::new("123", "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContextError::LanguageModel(_)));
        let ids = f.store.list_conversation_ids(&user(), Flow::Normal).await.unwrap();
        assert_eq!(ids.len(), 1);
        assert!(f
            .store
            .load_messages(&user(), Flow::Normal, &ids[0])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let f = fixture(MockAIProvider::new());
        f.kv.set_unavailable(true);

        let err = f
            .handler
            .handle(SendMessageCommand::new("123", "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, ContextError::Store(_)));
        assert_eq!(f.provider.call_count(), 0);
    }
}
