//! API Routes

use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::state::AppState;

/// Create the public API routes. No session gate runs here, so a stale or
/// garbage Authorization header cannot break login or registration.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Auth
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        // Accounts
        .route("/user/:id", get(handlers::account::get_account))
        // Agents
        .route("/agents", get(handlers::agent::list_agents))
        .route("/agents/:id", get(handlers::agent::agent_detail))
        .route("/agents/:id/approve", patch(handlers::agent::approve_agent))
        .route("/agents/:id/block", patch(handlers::agent::toggle_block))
        // Health
        .route("/health", get(handlers::health::health_check))
}

/// Create the routes that sit behind the session gate
pub fn protected_routes() -> Router<Arc<AppState>> {
    Router::new().route("/user", get(handlers::auth::me))
}

/// Create Swagger UI routes
pub fn swagger_routes() -> Router<Arc<AppState>> {
    use crate::openapi::ApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
