//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token allow-list check

pub mod auth;

pub use auth::{auth_middleware, check_authorization, AuthRejection, BearerAllowList};
