//! OpenAPI Documentation

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::dto;
use crate::error::ErrorResponse;
use crate::handlers;

/// TakaPay API Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "TakaPay API",
        description = "Account and agent-lifecycle backend for the TakaPay mobile financial service.",
        version = "0.1.0",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0"
        )
    ),
    paths(
        handlers::health::health_check,
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::me,
        handlers::account::get_account,
        handlers::agent::list_agents,
        handlers::agent::agent_detail,
        handlers::agent::approve_agent,
        handlers::agent::toggle_block,
    ),
    components(
        schemas(
            ErrorResponse,
            handlers::health::HealthResponse,
            dto::RegisterRequest,
            dto::MessageResponse,
            dto::LoginRequest,
            dto::LoginResponse,
            dto::SessionResponse,
            dto::AccountDto,
            dto::TransactionDto,
            dto::AgentDetailResponse,
            dto::ToggleBlockResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Registration, login and sessions"),
        (name = "Accounts", description = "Account lookup"),
        (name = "Agents", description = "Agent listing and lifecycle transitions")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// Security scheme modifier
pub struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = &mut openapi.components {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_generation() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "TakaPay API");
    }
}
