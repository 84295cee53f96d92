//! Account repository

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::store::AccountStore;
use crate::{DbAccount, DbError, DbResult, NewAccount};

/// Account repository for registration, lookup and lifecycle transitions
pub struct AccountRepo {
    pool: PgPool,
}

impl AccountRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for AccountRepo {
    async fn create(&self, account: NewAccount) -> DbResult<DbAccount> {
        let row = sqlx::query_as::<_, DbAccount>(
            r#"
            INSERT INTO accounts (name, mobile, email, nid, pin_hash, account_type, balance)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                id, name, mobile, email, nid, pin_hash, account_type,
                balance, is_blocked, created_at, updated_at
            "#,
        )
        .bind(&account.name)
        .bind(&account.mobile)
        .bind(&account.email)
        .bind(&account.nid)
        .bind(&account.pin_hash)
        .bind(account.account_type.as_str())
        .bind(account.balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The unique indexes are the backstop behind the pre-insert
            // existence query; map them to Duplicate so a racing second
            // registration still gets the right error.
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DbError::Duplicate("mobile, email or NID already registered".to_string());
                }
            }
            DbError::Query(e)
        })?;

        Ok(row)
    }

    async fn identity_exists(&self, mobile: &str, email: &str, nid: &str) -> DbResult<bool> {
        let row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE mobile = $1 OR email = $2 OR nid = $3) AS found",
        )
        .bind(mobile)
        .bind(email)
        .bind(nid)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.try_get::<bool, _>("found")?)
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbAccount>> {
        let account = sqlx::query_as::<_, DbAccount>(
            r#"
            SELECT
                id, name, mobile, email, nid, pin_hash, account_type,
                balance, is_blocked, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<DbAccount>> {
        let account = sqlx::query_as::<_, DbAccount>(
            r#"
            SELECT
                id, name, mobile, email, nid, pin_hash, account_type,
                balance, is_blocked, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_mobile(&self, mobile: &str) -> DbResult<Option<DbAccount>> {
        let account = sqlx::query_as::<_, DbAccount>(
            r#"
            SELECT
                id, name, mobile, email, nid, pin_hash, account_type,
                balance, is_blocked, created_at, updated_at
            FROM accounts
            WHERE mobile = $1
            "#,
        )
        .bind(mobile)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn approve_pending(&self, id: Uuid, float: Decimal) -> DbResult<bool> {
        // Eligibility check and transition in one statement: a concurrent
        // second approval matches zero rows instead of re-seeding.
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET account_type = 'agent', balance = $2, updated_at = NOW()
            WHERE id = $1 AND account_type = 'pending'
            "#,
        )
        .bind(id)
        .bind(float)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn toggle_block(&self, id: Uuid) -> DbResult<Option<bool>> {
        let row = sqlx::query(
            r#"
            UPDATE accounts
            SET is_blocked = NOT is_blocked, updated_at = NOW()
            WHERE id = $1 AND account_type = 'agent'
            RETURNING is_blocked
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(row.try_get::<bool, _>("is_blocked")?)),
            None => Ok(None),
        }
    }

    async fn list_agents(&self) -> DbResult<Vec<DbAccount>> {
        let agents = sqlx::query_as::<_, DbAccount>(
            r#"
            SELECT
                id, name, mobile, email, nid, pin_hash, account_type,
                balance, is_blocked, created_at, updated_at
            FROM accounts
            WHERE account_type IN ('agent', 'pending')
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(agents)
    }
}
