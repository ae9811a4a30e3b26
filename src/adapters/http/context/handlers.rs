//! HTTP handlers for the context endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ContextError, ConversationStore, GetContextHandler, GetContextQuery, InitiateCheckInCommand,
    InitiateCheckInHandler, LanguageModelGateway, SendMessageCommand, SendMessageHandler,
    UpdateContextCommand, UpdateContextHandler,
};
use crate::domain::foundation::ErrorCode;
use crate::ports::{AIProvider, KeyValueStore};

use super::dto::{
    ErrorResponse, GetContextResponse, InitiateCheckInRequest, InitiateCheckInResponse,
    SendMessageRequest, SendMessageResponse, UpdateContextRequest, UpdateContextResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the context routes.
#[derive(Clone)]
pub struct ContextAppState {
    send_message: SendMessageHandler,
    initiate_check_in: InitiateCheckInHandler,
    get_context: GetContextHandler,
    update_context: UpdateContextHandler,
}

impl ContextAppState {
    /// Wires every handler over one store handle and one provider.
    pub fn new(store: Arc<dyn KeyValueStore>, provider: Arc<dyn AIProvider>) -> Self {
        let conversations = ConversationStore::new(store);
        let gateway = LanguageModelGateway::new(provider);
        Self {
            send_message: SendMessageHandler::new(conversations.clone(), gateway),
            initiate_check_in: InitiateCheckInHandler::new(conversations.clone()),
            get_context: GetContextHandler::new(conversations.clone()),
            update_context: UpdateContextHandler::new(conversations),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /send-message
pub async fn send_message(
    State(state): State<ContextAppState>,
    body: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ContextApiError> {
    let Json(req) = body?;
    let result = state
        .send_message
        .handle(SendMessageCommand::new(req.user_id, req.message))
        .await?;
    Ok(Json(result.into()))
}

/// POST /initiate-check-in
pub async fn initiate_check_in(
    State(state): State<ContextAppState>,
    body: Result<Json<InitiateCheckInRequest>, JsonRejection>,
) -> Result<Json<InitiateCheckInResponse>, ContextApiError> {
    let Json(req) = body?;
    let result = state
        .initiate_check_in
        .handle(InitiateCheckInCommand::new(req.user_id))
        .await?;
    Ok(Json(result.into()))
}

/// GET /get-context/:user_id
pub async fn get_context(
    State(state): State<ContextAppState>,
    Path(user_id): Path<String>,
) -> Result<Json<GetContextResponse>, ContextApiError> {
    let context = state
        .get_context
        .handle(GetContextQuery::new(user_id))
        .await?;
    Ok(Json(context.into()))
}

/// POST /update-context
pub async fn update_context(
    State(state): State<ContextAppState>,
    body: Result<Json<UpdateContextRequest>, JsonRejection>,
) -> Result<Json<UpdateContextResponse>, ContextApiError> {
    let Json(req) = body?;
    let result = state
        .update_context
        .handle(UpdateContextCommand {
            user_id: req.user_id,
            flow: req.flow,
            conversation_id: req.conversation_id,
            updates: req.context_updates,
        })
        .await?;
    Ok(Json(result.into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

/// Errors returned by the context endpoints.
#[derive(Debug)]
pub enum ContextApiError {
    /// Body was not valid JSON for the endpoint.
    MalformedBody(String),
    Context(ContextError),
}

impl From<ContextError> for ContextApiError {
    fn from(err: ContextError) -> Self {
        Self::Context(err)
    }
}

impl From<JsonRejection> for ContextApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ContextApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ContextApiError::MalformedBody(reason) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed, reason),
            ),
            ContextApiError::Context(err) if err.is_client_error() => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(err.code(), err.to_string()),
            ),
            ContextApiError::Context(err) => {
                tracing::error!(error = %err, code = %err.code(), "Upstream failure");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorResponse::new(err.code(), "Upstream service error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
