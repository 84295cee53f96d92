//! Session Gate for Axum
//!
//! Tower middleware that resolves the `Authorization: Bearer` header into an
//! [`AuthSession`] on request extensions. A token that fails verification is
//! rejected here with 403 before any handler runs; a request with no token
//! passes through and the [`RequireAuth`] extractor rejects it with 401 on
//! protected routes.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, Request},
    http::{request::Parts, StatusCode},
    response::Response,
};
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

use crate::error::{AuthError, ErrorResponse};
use crate::jwt::TokenService;
use crate::types::AuthSession;

/// Session gate layer
#[derive(Clone)]
pub struct AuthLayer {
    tokens: Arc<TokenService>,
}

impl AuthLayer {
    /// Create a new session gate layer
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S> Layer<S> for AuthLayer {
    type Service = AuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthMiddleware {
            inner,
            tokens: self.tokens.clone(),
        }
    }
}

/// Session gate middleware service
#[derive(Clone)]
pub struct AuthMiddleware<S> {
    inner: S,
    tokens: Arc<TokenService>,
}

impl<S> Service<Request> for AuthMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let tokens = self.tokens.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match bearer_token(req.headers()) {
                Some(token) => match tokens.verify_session(&token) {
                    Ok(session) => {
                        let (mut parts, body) = req.into_parts();
                        parts.extensions.insert(session);
                        inner.call(Request::from_parts(parts, body)).await
                    }
                    Err(e) => Ok(auth_error_response(e)),
                },
                // No token: the handler decides whether auth is required
                None => inner.call(req).await,
            }
        })
    }
}

/// Extract a bearer token from the Authorization header
fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let auth_str = headers.get("Authorization")?.to_str().ok()?;
    auth_str.strip_prefix("Bearer ").map(String::from)
}

/// Create error response for authentication errors
fn auth_error_response(error: AuthError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = ErrorResponse::from(&error);

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap_or_default()))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}

// =============================================================================
// Axum Extractors
// =============================================================================

/// Extractor for a required session.
/// Rejects with 401 when no valid session is attached.
pub struct RequireAuth(pub AuthSession);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthSession>()
            .cloned()
            .map(RequireAuth)
            .ok_or_else(|| auth_error_response(AuthError::MissingToken))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_extraction() {
        use axum::http::HeaderMap;

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi".to_string()));

        let mut headers = HeaderMap::new();
        headers.insert("Authorization", "Basic dXNlcjpwdw==".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);

        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_auth_error_response_codes() {
        let response = auth_error_response(AuthError::MissingToken);
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = auth_error_response(AuthError::InvalidToken);
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
