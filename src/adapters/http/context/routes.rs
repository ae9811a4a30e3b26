//! Axum router configuration for the context endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_context, initiate_check_in, send_message, update_context, ContextAppState,
};

/// Create the context API router.
///
/// # Routes
/// - `POST /send-message` - Exchange one message in the active flow
/// - `POST /initiate-check-in` - Switch to the check-in flow with a new conversation
/// - `GET /get-context/:user_id` - Every conversation of both flows
/// - `POST /update-context` - Write fields into one conversation
pub fn context_routes() -> Router<ContextAppState> {
    Router::new()
        .route("/send-message", post(send_message))
        .route("/initiate-check-in", post(initiate_check_in))
        .route("/get-context/:user_id", get(get_context))
        .route("/update-context", post(update_context))
}
