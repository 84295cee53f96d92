//! TakaPay REST API
//!
//! Account and agent-lifecycle endpoints for the TakaPay MFS backend.
//!
//! # API Structure
//!
//! ```text
//! /register             - Create an account (user / agent / pending)
//! /login                - PIN login, returns a bearer token
//! /user                 - Decoded session of the calling token
//! /user/:id             - Account lookup by id
//! /agents               - List agents and pending applications
//! /agents/:id           - Agent detail with recent transactions
//! /agents/:id/approve   - Approve a pending application
//! /agents/:id/block     - Toggle the block flag of an agent
//! /health               - Liveness
//! ```
//!
//! The session gate is scoped to the protected routes: there a bearer token
//! that fails verification is rejected with 403 before the handler, and the
//! `RequireAuth` extractor turns a missing token into 401. Public routes
//! ignore the Authorization header entirely, so a stale token cannot break
//! login.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::Router;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult, ErrorResponse};
pub use state::AppState;

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Enable request tracing
    pub enable_tracing: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_tracing: true,
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let session_gate = state.auth.layer();

    let mut router = Router::new()
        .merge(routes::public_routes())
        .merge(routes::protected_routes().route_layer(session_gate))
        .merge(routes::swagger_routes())
        .with_state(state);

    if config.enable_tracing {
        router = router.layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        );
    }

    if config.enable_cors {
        let cors = if config.cors_origins.contains(&"*".to_string()) {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(
                    config
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::PATCH,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
        };
        router = router.layer(cors);
    }

    router
}

/// Create a minimal router for testing (no CORS or tracing layers)
pub fn create_test_router(state: Arc<AppState>) -> Router {
    let session_gate = state.auth.layer();

    Router::new()
        .merge(routes::public_routes())
        .merge(routes::protected_routes().route_layer(session_gate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert!(config.enable_cors);
        assert!(config.enable_tracing);
    }
}
