//! HTTP adapter for the context endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ContextsResponse, ConversationResponse, ErrorResponse, GetContextResponse,
    InitiateCheckInRequest, InitiateCheckInResponse, SendMessageRequest, SendMessageResponse,
    UpdateContextRequest, UpdateContextResponse, CONTEXT_UPDATED_MESSAGE,
};
pub use handlers::{ContextApiError, ContextAppState};
pub use routes::context_routes;
