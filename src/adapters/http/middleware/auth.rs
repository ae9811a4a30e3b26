//! Bearer allow-list middleware for axum.
//!
//! Every route sits behind a static list of accepted bearer tokens, read
//! from configuration at start-up.
//!
//! - No `Authorization` header: 401 `Authorization header missing`
//! - Header present but token not in the list: 403 `Invalid or missing token`
//!
//! # Example
//!
//! ```ignore
//! let allow_list = BearerAllowList::new(config.auth.tokens());
//!
//! let app = Router::new()
//!     .route("/send-message", post(send_message))
//!     .layer(middleware::from_fn_with_state(allow_list, auth_middleware));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;

use crate::adapters::http::context::ErrorResponse;
use crate::domain::foundation::ErrorCode;

/// Accepted bearer tokens.
#[derive(Clone)]
pub struct BearerAllowList {
    tokens: Arc<Vec<String>>,
}

impl BearerAllowList {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: Arc::new(tokens.into_iter().map(Into::into).collect()),
        }
    }

    /// Compares against every entry in constant time per entry.
    pub fn allows(&self, candidate: &str) -> bool {
        self.tokens.iter().fold(false, |found, token| {
            let matches: bool = token.as_bytes().ct_eq(candidate.as_bytes()).into();
            found | matches
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl std::fmt::Debug for BearerAllowList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerAllowList")
            .field("tokens", &self.tokens.len())
            .finish()
    }
}

/// Why a request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header at all.
    MissingHeader,
    /// Header present, token absent or not in the allow list.
    InvalidToken,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AuthRejection::MissingHeader => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(ErrorCode::Unauthorized, "Authorization header missing"),
            ),
            AuthRejection::InvalidToken => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(ErrorCode::Forbidden, "Invalid or missing token"),
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Checks the `Authorization` header against the allow list.
///
/// The token is the second space-separated word of the header, so
/// `Bearer <token>` is the expected shape.
pub fn check_authorization(
    allow_list: &BearerAllowList,
    header: Option<&str>,
) -> Result<(), AuthRejection> {
    let header = header.ok_or(AuthRejection::MissingHeader)?;
    let token = header.split(' ').nth(1).unwrap_or_default();
    if !token.is_empty() && allow_list.allows(token) {
        Ok(())
    } else {
        Err(AuthRejection::InvalidToken)
    }
}

/// Authentication middleware enforcing the bearer allow list.
pub async fn auth_middleware(
    State(allow_list): State<BearerAllowList>,
    request: Request,
    next: Next,
) -> Response {
    let header = request.headers().get(AUTHORIZATION).map(|value| value.to_str());
    let result = match header {
        None => Err(AuthRejection::MissingHeader),
        Some(Ok(value)) => check_authorization(&allow_list, Some(value)),
        Some(Err(_)) => Err(AuthRejection::InvalidToken),
    };

    match result {
        Ok(()) => next.run(request).await,
        Err(rejection) => {
            tracing::debug!(rejection = ?rejection, path = %request.uri().path(), "Request rejected");
            rejection.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> BearerAllowList {
        BearerAllowList::new(["alpha", "beta"])
    }

    #[test]
    fn accepts_listed_tokens() {
        assert!(check_authorization(&allow_list(), Some("Bearer alpha")).is_ok());
        assert!(check_authorization(&allow_list(), Some("Bearer beta")).is_ok());
    }

    #[test]
    fn missing_header_is_401() {
        let rejection = check_authorization(&allow_list(), None).unwrap_err();
        assert_eq!(rejection, AuthRejection::MissingHeader);
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_token_is_403() {
        let rejection = check_authorization(&allow_list(), Some("Bearer gamma")).unwrap_err();
        assert_eq!(rejection, AuthRejection::InvalidToken);
        assert_eq!(rejection.into_response().status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn header_without_token_is_403() {
        assert_eq!(
            check_authorization(&allow_list(), Some("Bearer")),
            Err(AuthRejection::InvalidToken)
        );
        assert_eq!(
            check_authorization(&allow_list(), Some("")),
            Err(AuthRejection::InvalidToken)
        );
    }

    #[test]
    fn prefixes_of_tokens_are_rejected() {
        assert!(!allow_list().allows("alph"));
        assert!(!allow_list().allows("alphabet"));
    }

    #[test]
    fn empty_allow_list_rejects_everything() {
        let empty = BearerAllowList::new(Vec::<String>::new());
        assert!(empty.is_empty());
        assert!(!empty.allows("alpha"));
    }
}
