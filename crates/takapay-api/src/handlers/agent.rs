//! Agent lifecycle handlers
//!
//! Listing, detail view and the two administrative transitions: approval of
//! a pending application and the block toggle. Both transitions are single
//! conditional updates in the store, so concurrent calls cannot double-apply.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use takapay_types::AGENT_SEED_BALANCE;

use crate::dto::{AccountDto, AgentDetailResponse, MessageResponse, ToggleBlockResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Transactions returned with an agent detail view
const AGENT_DETAIL_TX_LIMIT: i64 = 100;

/// List all agent and pending-agent accounts
#[utoipa::path(
    get,
    path = "/agents",
    tag = "Agents",
    responses(
        (status = 200, description = "Agents and pending applications", body = [AccountDto])
    )
)]
pub async fn list_agents(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<AccountDto>>> {
    let agents = state.accounts.list_agents().await?;
    Ok(Json(agents.into_iter().map(AccountDto::from).collect()))
}

/// Agent detail with recent transactions
#[utoipa::path(
    get,
    path = "/agents/{id}",
    tag = "Agents",
    params(("id" = String, Path, description = "Agent account id")),
    responses(
        (status = 200, description = "Agent and recent transactions", body = AgentDetailResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No such agent")
    )
)]
pub async fn agent_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AgentDetailResponse>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::BadId)?;

    let account = state
        .accounts
        .find_by_id(id)
        .await?
        .filter(|a| a.role().is_agent_or_pending())
        .ok_or_else(|| ApiError::NotFound(format!("agent {}", id)))?;

    let transactions = state
        .transactions
        .recent_for_account(id, AGENT_DETAIL_TX_LIMIT)
        .await?;

    Ok(Json(AgentDetailResponse {
        agent: account.into(),
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}

/// Approve a pending agent application
#[utoipa::path(
    patch,
    path = "/agents/{id}/approve",
    tag = "Agents",
    params(("id" = String, Path, description = "Account id of the pending application")),
    responses(
        (status = 200, description = "Application approved", body = MessageResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Account absent or not pending")
    )
)]
pub async fn approve_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::BadId)?;

    let approved = state
        .accounts
        .approve_pending(id, AGENT_SEED_BALANCE)
        .await?;

    if !approved {
        return Err(ApiError::NotEligible(format!(
            "account {} is not a pending application",
            id
        )));
    }

    tracing::info!(account_id = %id, "Agent application approved");

    Ok(Json(MessageResponse {
        message: "Agent approved".to_string(),
    }))
}

/// Toggle the block flag of an agent account
#[utoipa::path(
    patch,
    path = "/agents/{id}/block",
    tag = "Agents",
    params(("id" = String, Path, description = "Agent account id")),
    responses(
        (status = 200, description = "Block state flipped", body = ToggleBlockResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Account absent or not an agent")
    )
)]
pub async fn toggle_block(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ToggleBlockResponse>> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::BadId)?;

    let is_blocked = state
        .accounts
        .toggle_block(id)
        .await?
        .ok_or_else(|| ApiError::NotEligible(format!("account {} is not an agent", id)))?;

    tracing::info!(account_id = %id, is_blocked, "Agent block state toggled");

    let message = if is_blocked {
        "Agent blocked"
    } else {
        "Agent unblocked"
    };

    Ok(Json(ToggleBlockResponse {
        message: message.to_string(),
        is_blocked,
    }))
}
