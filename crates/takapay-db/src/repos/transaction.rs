//! Transaction repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::store::TransactionStore;
use crate::{DbResult, DbTransaction};

/// Read-only transaction repository feeding the agent detail view
pub struct TransactionRepo {
    pool: PgPool,
}

impl TransactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for TransactionRepo {
    async fn recent_for_account(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> DbResult<Vec<DbTransaction>> {
        let transactions = sqlx::query_as::<_, DbTransaction>(
            r#"
            SELECT id, account_id, amount, tx_type, counterparty, created_at
            FROM transactions
            WHERE account_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
