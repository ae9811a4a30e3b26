//! UpdateContext command handler.
//!
//! Writes caller-supplied fields into one conversation's field map. The
//! `messages` field is special: new messages are appended to the stored
//! transcript instead of replacing it.

use serde_json::{Map, Value};

use crate::application::{encode_messages, ContextError, ConversationStore};
use crate::domain::context::{Flow, Message, MESSAGES_FIELD};
use crate::domain::foundation::{ConversationId, UserId, ValidationError};

use super::validation::require_non_empty;

const UPDATES_FIELD: &str = "contextUpdates";

/// Command to update a conversation's fields.
#[derive(Debug, Clone)]
pub struct UpdateContextCommand {
    pub user_id: String,
    pub flow: String,
    pub conversation_id: String,
    pub updates: Option<Value>,
}

/// Result of an applied update.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateContextResult {
    pub user_id: UserId,
    pub flow: Flow,
    pub conversation_id: ConversationId,
    /// The updates as written; `messages` holds the merged transcript JSON.
    pub applied: Map<String, Value>,
}

/// Handler for UpdateContext commands.
#[derive(Clone)]
pub struct UpdateContextHandler {
    store: ConversationStore,
}

impl UpdateContextHandler {
    pub fn new(store: ConversationStore) -> Self {
        Self { store }
    }

    pub async fn handle(
        &self,
        cmd: UpdateContextCommand,
    ) -> Result<UpdateContextResult, ContextError> {
        let updates_present = if cmd.updates.as_ref().map_or(true, Value::is_null) {
            ""
        } else {
            "present"
        };
        require_non_empty(&[
            ("userId", &cmd.user_id),
            ("flow", &cmd.flow),
            ("conversationId", &cmd.conversation_id),
            (UPDATES_FIELD, updates_present),
        ])?;

        let mut updates = match cmd.updates {
            Some(Value::Object(map)) => map,
            _ => {
                return Err(
                    ValidationError::invalid_format(UPDATES_FIELD, "must be an object").into(),
                )
            }
        };
        if updates.is_empty() {
            return Err(ValidationError::invalid_format(
                UPDATES_FIELD,
                "must contain at least one field",
            )
            .into());
        }

        let flow: Flow = cmd.flow.parse()?;
        let user_id = UserId::new(cmd.user_id)?;
        let conversation_id = ConversationId::new(cmd.conversation_id)?;
        let appended = updates
            .get(MESSAGES_FIELD)
            .map(parse_new_messages)
            .transpose()?;

        if let Some(new_messages) = appended {
            let mut merged = self
                .store
                .load_messages(&user_id, flow, &conversation_id)
                .await?;
            merged.extend(new_messages);
            updates.insert(
                MESSAGES_FIELD.to_string(),
                Value::String(encode_messages(&merged)?),
            );
        }

        let fields: Vec<(String, String)> = updates
            .iter()
            .map(|(name, value)| (name.clone(), field_text(value)))
            .collect();
        self.store
            .write_fields(&user_id, flow, &conversation_id, &fields)
            .await?;

        tracing::info!(
            user_id = %user_id,
            flow = %flow,
            conversation_id = %conversation_id,
            fields = fields.len(),
            "Context updated"
        );

        Ok(UpdateContextResult {
            user_id,
            flow,
            conversation_id,
            applied: updates,
        })
    }
}

fn parse_new_messages(value: &Value) -> Result<Vec<Message>, ValidationError> {
    let field = format!("{UPDATES_FIELD}.{MESSAGES_FIELD}");
    if !value.is_array() {
        return Err(ValidationError::invalid_format(field, "must be an array"));
    }
    serde_json::from_value(value.clone())
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

/// Strings are stored verbatim, anything else as its JSON text.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryKeyValueStore;
    use crate::ports::KeyValueStore;
    use serde_json::json;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryKeyValueStore>, ConversationStore, UpdateContextHandler) {
        let kv = Arc::new(InMemoryKeyValueStore::new());
        let store = ConversationStore::new(kv.clone());
        (kv, store.clone(), UpdateContextHandler::new(store))
    }

    fn command(flow: &str, updates: Option<Value>) -> UpdateContextCommand {
        UpdateContextCommand {
            user_id: "123".to_string(),
            flow: flow.to_string(),
            conversation_id: "c1".to_string(),
            updates,
        }
    }

    fn user() -> UserId {
        UserId::new("123").unwrap()
    }

    fn c1() -> ConversationId {
        ConversationId::new("c1").unwrap()
    }

    #[tokio::test]
    async fn messages_are_appended_not_replaced() {
        let (_, store, handler) = setup();
        store
            .save_messages(&user(), Flow::Normal, &c1(), &[Message::system("Initial message")])
            .await
            .unwrap();

        let result = handler
            .handle(command(
                "normal",
                Some(json!({"messages": [{"role": "user", "content": "New message"}]})),
            ))
            .await
            .unwrap();

        let expected = vec![Message::system("Initial message"), Message::user("New message")];
        assert_eq!(
            store.load_messages(&user(), Flow::Normal, &c1()).await.unwrap(),
            expected
        );
        assert_eq!(
            result.applied["messages"],
            Value::String(serde_json::to_string(&expected).unwrap())
        );
    }

    #[tokio::test]
    async fn messages_on_empty_conversation_start_the_transcript() {
        let (_, store, handler) = setup();

        handler
            .handle(command(
                "check-in",
                Some(json!({"messages": [{"role": "system", "content": "Hi"}]})),
            ))
            .await
            .unwrap();

        assert_eq!(
            store.load_messages(&user(), Flow::CheckIn, &c1()).await.unwrap(),
            vec![Message::system("Hi")]
        );
    }

    #[tokio::test]
    async fn other_fields_are_written_as_given() {
        let (kv, store, handler) = setup();
        store
            .save_messages(&user(), Flow::Normal, &c1(), &[Message::user("Hi")])
            .await
            .unwrap();

        let result = handler
            .handle(command("normal", Some(json!({"mood": "calm", "score": 7}))))
            .await
            .unwrap();

        assert_eq!(result.applied, json!({"mood": "calm", "score": 7}).as_object().unwrap().clone());
        assert_eq!(
            kv.hash_get("context:123:normal:c1", "mood").await.unwrap(),
            Some("calm".to_string())
        );
        assert_eq!(
            kv.hash_get("context:123:normal:c1", "score").await.unwrap(),
            Some("7".to_string())
        );
        assert_eq!(
            store.load_messages(&user(), Flow::Normal, &c1()).await.unwrap(),
            vec![Message::user("Hi")]
        );
    }

    #[tokio::test]
    async fn unknown_flow_is_rejected_even_when_keys_exist() {
        let (kv, _, handler) = setup();
        kv.hash_set(
            "context:123:weekly:c1",
            &[("messages".to_string(), "[]".to_string())],
        )
        .await
        .unwrap();
        let before = kv.operation_count();

        let err = handler
            .handle(command("weekly", Some(json!({"mood": "calm"}))))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContextError::Validation(ValidationError::InvalidFlow { .. })
        ));
        assert_eq!(kv.operation_count(), before);
    }

    #[tokio::test]
    async fn missing_fields_are_all_named() {
        let (_, _, handler) = setup();

        let err = handler
            .handle(UpdateContextCommand {
                user_id: "123".to_string(),
                flow: String::new(),
                conversation_id: String::new(),
                updates: Some(Value::Null),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContextError::Validation(ValidationError::MissingFields { ref fields })
                if fields == &["flow".to_string(), "conversationId".to_string(), "contextUpdates".to_string()]
        ));
    }

    #[tokio::test]
    async fn non_object_updates_are_rejected() {
        let (_, _, handler) = setup();

        let err = handler
            .handle(command("normal", Some(json!(["mood"]))))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ContextError::Validation(ValidationError::InvalidFormat { ref field, .. })
                if field == "contextUpdates"
        ));
    }

    #[tokio::test]
    async fn empty_updates_are_rejected() {
        let (_, _, handler) = setup();
        let err = handler
            .handle(command("normal", Some(json!({}))))
            .await
            .unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn malformed_messages_are_rejected_before_any_write() {
        let (kv, _, handler) = setup();

        for bad in [json!("not a list"), json!([{"role": "bot", "content": "x"}])] {
            let err = handler
                .handle(command("normal", Some(json!({ "messages": bad }))))
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                ContextError::Validation(ValidationError::InvalidFormat { ref field, .. })
                    if field == "contextUpdates.messages"
            ));
        }
        assert_eq!(kv.operation_count(), 0);
    }
}
