//! HTTP adapters - REST API implementations.
//!
//! `router` assembles the context routes behind the bearer allow list,
//! with request tracing, a request timeout and CORS.

pub mod context;
pub mod middleware;

use std::time::Duration;

use axum::{
    http::{header, Method},
    middleware as axum_middleware, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

pub use context::{context_routes, ContextApiError, ContextAppState};
pub use middleware::{auth_middleware, BearerAllowList};

/// Cross-cutting HTTP settings.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub request_timeout: Duration,
    /// Allowed origins; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
        }
    }
}

/// Builds the complete application router.
pub fn router(
    state: ContextAppState,
    allow_list: BearerAllowList,
    settings: &HttpSettings,
) -> Router {
    context_routes()
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(allow_list, auth_middleware))
        .layer(TimeoutLayer::new(settings.request_timeout))
        .layer(build_cors(&settings.cors_origins))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(parsed)
    }
}
