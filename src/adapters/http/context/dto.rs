//! Request and response bodies for the context endpoints.
//!
//! Field names are camelCase on the wire. Request fields default to empty
//! so that absent fields reach the handlers and are reported together.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::handlers::{
    ConversationTranscript, InitiateCheckInResult, SendMessageResult, UpdateContextResult,
    UserContext,
};
use crate::domain::context::{Flow, Message};
use crate::domain::foundation::{ConversationId, UserId};

/// Confirmation text returned by a successful update.
pub const CONTEXT_UPDATED_MESSAGE: &str = "Context updated successfully";

// ════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SendMessageRequest {
    pub user_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InitiateCheckInRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateContextRequest {
    pub user_id: String,
    pub flow: String,
    pub conversation_id: String,
    pub context_updates: Option<Value>,
}

// ════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageResponse {
    pub user_id: UserId,
    pub flow: Flow,
    pub conversation_id: ConversationId,
    pub category: String,
    pub response: String,
}

impl From<SendMessageResult> for SendMessageResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            user_id: result.user_id,
            flow: result.flow,
            conversation_id: result.conversation_id,
            category: result.category,
            response: result.reply,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitiateCheckInResponse {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
    pub message: String,
}

impl From<InitiateCheckInResult> for InitiateCheckInResponse {
    fn from(result: InitiateCheckInResult) -> Self {
        Self {
            user_id: result.user_id,
            conversation_id: result.conversation_id,
            message: result.greeting,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationResponse {
    pub conversation_id: ConversationId,
    pub messages: Vec<Message>,
}

impl From<ConversationTranscript> for ConversationResponse {
    fn from(transcript: ConversationTranscript) -> Self {
        Self {
            conversation_id: transcript.conversation_id,
            messages: transcript.messages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ContextsResponse {
    pub normal: Vec<ConversationResponse>,
    #[serde(rename = "check-in")]
    pub check_in: Vec<ConversationResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetContextResponse {
    pub user_id: UserId,
    pub active_flow: Flow,
    pub contexts: ContextsResponse,
}

impl From<UserContext> for GetContextResponse {
    fn from(context: UserContext) -> Self {
        let convert = |list: Vec<ConversationTranscript>| -> Vec<ConversationResponse> {
            list.into_iter().map(ConversationResponse::from).collect()
        };
        Self {
            user_id: context.user_id,
            active_flow: context.active_flow,
            contexts: ContextsResponse {
                normal: convert(context.contexts.normal),
                check_in: convert(context.contexts.check_in),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContextResponse {
    pub user_id: UserId,
    pub flow: Flow,
    pub conversation_id: ConversationId,
    pub message: String,
    pub context_updates: Map<String, Value>,
}

impl From<UpdateContextResult> for UpdateContextResponse {
    fn from(result: UpdateContextResult) -> Self {
        Self {
            user_id: result.user_id,
            flow: result.flow,
            conversation_id: result.conversation_id,
            message: CONTEXT_UPDATED_MESSAGE.to_string(),
            context_updates: result.applied,
        }
    }
}

/// Error body: `{"error": <message>, "code": <CODE>}`.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
        }
    }
}
