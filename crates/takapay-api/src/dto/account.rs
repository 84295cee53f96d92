//! Account and agent DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use takapay_db::{DbAccount, DbTransaction};
use utoipa::ToSchema;

/// Sanitized account view. Built from a [`DbAccount`]; the PIN hash never
/// crosses this boundary.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    /// Account id
    pub id: String,
    /// Display name
    pub name: String,
    /// Mobile number
    pub mobile: String,
    /// Email address
    pub email: String,
    /// National ID
    pub nid: String,
    /// Role: user, agent, pending or admin
    pub account_type: String,
    /// Current balance
    pub balance: Decimal,
    /// Whether the account is blocked
    pub is_blocked: bool,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<DbAccount> for AccountDto {
    fn from(account: DbAccount) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name,
            mobile: account.mobile,
            email: account.email,
            nid: account.nid,
            account_type: account.account_type,
            balance: account.balance,
            is_blocked: account.is_blocked,
            created_at: account.created_at,
        }
    }
}

/// Transaction view for the agent detail endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDto {
    /// Transaction id
    pub id: String,
    /// Amount
    pub amount: Decimal,
    /// Transaction type
    pub tx_type: String,
    /// Counterparty identifier, if any
    pub counterparty: Option<String>,
    /// Timestamp
    pub created_at: DateTime<Utc>,
}

impl From<DbTransaction> for TransactionDto {
    fn from(tx: DbTransaction) -> Self {
        Self {
            id: tx.id.to_string(),
            amount: tx.amount,
            tx_type: tx.tx_type,
            counterparty: tx.counterparty,
            created_at: tx.created_at,
        }
    }
}

/// Agent detail: the account plus its most recent transactions
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgentDetailResponse {
    /// The agent account
    pub agent: AccountDto,
    /// Up to 100 most recent transactions, newest first
    pub transactions: Vec<TransactionDto>,
}

/// Block toggle outcome
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToggleBlockResponse {
    /// Outcome message
    pub message: String,
    /// New block state
    pub is_blocked: bool,
}
