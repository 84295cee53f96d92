//! Authentication Handlers
//!
//! Registration, login and session introspection.

use axum::{extract::State, http::StatusCode, Json};
use std::str::FromStr;
use std::sync::Arc;
use validator::Validate;

use takapay_auth::RequireAuth;
use takapay_db::NewAccount;
use takapay_types::{seed_balance, AccountType, LoginIdentifier};

use crate::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest, SessionResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = MessageResponse),
        (status = 400, description = "Duplicate identity or invalid request")
    )
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    // 1. Validate the request shape before touching storage
    request.validate()?;

    let role = AccountType::from_str(&request.account_type)
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    // 2. One disjunctive existence check across the three identity fields
    let taken = state
        .accounts
        .identity_exists(&request.mobile, &request.email, &request.nid)
        .await?;
    if taken {
        return Err(ApiError::DuplicateIdentity);
    }

    // 3. Hash the PIN (format-checked before hashing)
    let pin_hash = state.auth.pins.hash_pin(&request.pin)?;

    // 4. Seed the balance by role and insert. The unique indexes catch a
    // racing registration between the existence check and the insert.
    let account = state
        .accounts
        .create(NewAccount {
            name: request.name,
            mobile: request.mobile,
            email: request.email,
            nid: request.nid,
            pin_hash,
            account_type: role,
            balance: seed_balance(role),
        })
        .await?;

    tracing::info!(
        account_id = %account.id,
        account_type = %account.account_type,
        "New account registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "success".to_string(),
        }),
    ))
}

/// Log in with an email or mobile identifier and a PIN
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 400, description = "Unknown account, bad identifier format or wrong PIN"),
        (status = 403, description = "Account is blocked")
    )
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    // 1. Classify the identifier; a malformed one never reaches storage
    let identifier =
        LoginIdentifier::classify(&request.identifier).ok_or(ApiError::BadFormat)?;

    // 2. Look up by the classified field
    let account = match &identifier {
        LoginIdentifier::Email(email) => state.accounts.find_by_email(email).await?,
        LoginIdentifier::Mobile(mobile) => state.accounts.find_by_mobile(mobile).await?,
    }
    .ok_or(ApiError::AccountNotFound)?;

    // 3. Blocked accounts are rejected before the PIN is examined
    if account.is_blocked {
        return Err(ApiError::Blocked);
    }

    // 4. Verify the PIN
    let pin_ok = state.auth.pins.verify_pin(&request.pin, &account.pin_hash)?;
    if !pin_ok {
        return Err(ApiError::InvalidCredentials);
    }

    // 5. Issue a bearer token carrying the id and role at login time
    let token = state.auth.tokens.issue(account.id, account.role())?;

    tracing::info!(account_id = %account.id, "Account logged in");

    Ok(Json(LoginResponse {
        token,
        user: account.into(),
        message: "Login successful".to_string(),
    }))
}

/// Return the decoded session of the calling token
#[utoipa::path(
    get,
    path = "/user",
    tag = "Authentication",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Decoded session", body = SessionResponse),
        (status = 401, description = "No token"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn me(RequireAuth(session): RequireAuth) -> ApiResult<Json<SessionResponse>> {
    Ok(Json(SessionResponse {
        account_id: session.account_id.to_string(),
        role: session.role.to_string(),
    }))
}
