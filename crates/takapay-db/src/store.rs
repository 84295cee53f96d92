//! Store contracts for the lifecycle engine
//!
//! The engine is written against these traits rather than concrete repos so
//! that the API tests can run against an in-memory double with the same
//! conditional-update semantics.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{DbAccount, DbTransaction, NewAccount};

/// Durable keyed storage for accounts.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account. Fails with `DbError::Duplicate` when the mobile,
    /// email or NID collides with an existing account.
    async fn create(&self, account: NewAccount) -> DbResult<DbAccount>;

    /// Single disjunctive existence query across the three identity fields.
    async fn identity_exists(&self, mobile: &str, email: &str, nid: &str) -> DbResult<bool>;

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbAccount>>;

    async fn find_by_email(&self, email: &str) -> DbResult<Option<DbAccount>>;

    async fn find_by_mobile(&self, mobile: &str) -> DbResult<Option<DbAccount>>;

    /// Promote a pending application to an active agent and seed its float,
    /// as one atomic conditional update.
    ///
    /// Returns `true` when the transition applied, `false` when the account
    /// is absent or not currently `pending` (already approved included). At
    /// most one of any number of concurrent calls can observe `true`.
    async fn approve_pending(&self, id: Uuid, float: Decimal) -> DbResult<bool>;

    /// Flip the block flag of an agent account as one atomic conditional
    /// update.
    ///
    /// Returns the new `is_blocked` value, or `None` when the account is
    /// absent or not an agent.
    async fn toggle_block(&self, id: Uuid) -> DbResult<Option<bool>>;

    /// All agent and pending-agent accounts, in storage order.
    async fn list_agents(&self) -> DbResult<Vec<DbAccount>>;
}

/// Read-only access to the transaction collection.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Most recent transactions for an account, newest first.
    async fn recent_for_account(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> DbResult<Vec<DbTransaction>>;
}
