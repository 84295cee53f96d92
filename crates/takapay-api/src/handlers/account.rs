//! Account lookup handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::AccountDto;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Look up an account by id
#[utoipa::path(
    get,
    path = "/user/{id}",
    tag = "Accounts",
    params(("id" = String, Path, description = "Account id")),
    responses(
        (status = 200, description = "The account", body = AccountDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such account")
    )
)]
pub async fn get_account(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccountDto>> {
    // A malformed id is rejected before any storage query
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::BadId)?;

    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("account {}", id)))?;

    Ok(Json(account.into()))
}
