//! Database models - mapped from PostgreSQL tables

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use takapay_types::AccountType;
use uuid::Uuid;

// ============================================================================
// Account Models
// ============================================================================

/// A persisted account row.
///
/// `pin_hash` must never be serialized into an HTTP response; the API layer
/// converts this row into a sanitized DTO before returning it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbAccount {
    pub id: Uuid,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub nid: String,
    pub pin_hash: String,
    pub account_type: String,
    pub balance: Decimal,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbAccount {
    /// Typed role of this account.
    ///
    /// The `account_type` column carries a CHECK constraint restricting it to
    /// the four known roles, so the fallback is unreachable on rows written
    /// by this store.
    pub fn role(&self) -> AccountType {
        self.account_type.parse().unwrap_or(AccountType::User)
    }
}

/// Fields for inserting a new account. The id and timestamps are generated
/// by the store.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub nid: String,
    pub pin_hash: String,
    pub account_type: AccountType,
    pub balance: Decimal,
}

// ============================================================================
// Transaction Models
// ============================================================================

/// A persisted transaction row. This core never writes transactions; they
/// are read for the agent detail view only.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbTransaction {
    pub id: Uuid,
    pub account_id: Uuid,
    pub amount: Decimal,
    pub tx_type: String,
    pub counterparty: Option<String>,
    pub created_at: DateTime<Utc>,
}
