//! In-memory store for tests
//!
//! Implements the [`AccountStore`] and [`TransactionStore`] contracts with the
//! same conditional-update semantics as the PostgreSQL repos: approve and
//! block-toggle are check-and-mutate under one lock, so concurrent callers
//! see at-most-once transitions just like the single-statement SQL versions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::store::{AccountStore, TransactionStore};
use crate::{DbAccount, DbError, DbResult, DbTransaction, NewAccount};

/// In-memory account and transaction store.
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<HashMap<Uuid, DbAccount>>,
    transactions: Mutex<Vec<DbTransaction>>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store operations performed so far. Lets tests assert that a
    /// rejected request never reached storage.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Seed an account directly, bypassing the duplicate check.
    pub fn insert_account(&self, account: DbAccount) {
        let mut accounts = self.accounts.lock().unwrap();
        accounts.insert(account.id, account);
    }

    /// Seed a transaction row.
    pub fn push_transaction(&self, tx: DbTransaction) {
        let mut transactions = self.transactions.lock().unwrap();
        transactions.push(tx);
    }

    /// Snapshot of an account for post-condition assertions.
    pub fn account(&self, id: Uuid) -> Option<DbAccount> {
        let accounts = self.accounts.lock().unwrap();
        accounts.get(&id).cloned()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl AccountStore for MemoryStore {
    async fn create(&self, account: NewAccount) -> DbResult<DbAccount> {
        self.record_call();
        let mut accounts = self.accounts.lock().unwrap();
        let collision = accounts.values().any(|existing| {
            existing.mobile == account.mobile
                || existing.email == account.email
                || existing.nid == account.nid
        });
        if collision {
            return Err(DbError::Duplicate(
                "mobile, email or NID already registered".to_string(),
            ));
        }

        let now = Utc::now();
        let row = DbAccount {
            id: Uuid::new_v4(),
            name: account.name,
            mobile: account.mobile,
            email: account.email,
            nid: account.nid,
            pin_hash: account.pin_hash,
            account_type: account.account_type.as_str().to_string(),
            balance: account.balance,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn identity_exists(&self, mobile: &str, email: &str, nid: &str) -> DbResult<bool> {
        self.record_call();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .any(|a| a.mobile == mobile || a.email == email || a.nid == nid))
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbAccount>> {
        self.record_call();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> DbResult<Option<DbAccount>> {
        self.record_call();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_mobile(&self, mobile: &str) -> DbResult<Option<DbAccount>> {
        self.record_call();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.values().find(|a| a.mobile == mobile).cloned())
    }

    async fn approve_pending(&self, id: Uuid, float: Decimal) -> DbResult<bool> {
        self.record_call();
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&id) {
            Some(account) if account.account_type == "pending" => {
                account.account_type = "agent".to_string();
                account.balance = float;
                account.updated_at = Utc::now();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn toggle_block(&self, id: Uuid) -> DbResult<Option<bool>> {
        self.record_call();
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.get_mut(&id) {
            Some(account) if account.account_type == "agent" => {
                account.is_blocked = !account.is_blocked;
                account.updated_at = Utc::now();
                Ok(Some(account.is_blocked))
            }
            _ => Ok(None),
        }
    }

    async fn list_agents(&self) -> DbResult<Vec<DbAccount>> {
        self.record_call();
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts
            .values()
            .filter(|a| a.account_type == "agent" || a.account_type == "pending")
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn recent_for_account(
        &self,
        account_id: Uuid,
        limit: i64,
    ) -> DbResult<Vec<DbTransaction>> {
        self.record_call();
        let transactions = self.transactions.lock().unwrap();
        let mut rows: Vec<DbTransaction> = transactions
            .iter()
            .filter(|t| t.account_id == account_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows.truncate(limit as usize);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use takapay_types::AccountType;

    fn pending_account() -> NewAccount {
        NewAccount {
            name: "Rafiq Agent".to_string(),
            mobile: "01712345678".to_string(),
            email: "rafiq@example.com".to_string(),
            nid: "1990123456789".to_string(),
            pin_hash: "$argon2id$stub".to_string(),
            account_type: AccountType::Pending,
            balance: Decimal::ZERO,
        }
    }

    #[tokio::test]
    async fn duplicate_identity_rejected() {
        let store = MemoryStore::new();
        store.create(pending_account()).await.unwrap();

        let mut second = pending_account();
        second.email = "other@example.com".to_string();
        second.nid = "1991000000000".to_string();
        // same mobile as the first row
        let err = store.create(second).await.unwrap_err();
        assert!(matches!(err, DbError::Duplicate(_)));
    }

    #[tokio::test]
    async fn approve_is_at_most_once() {
        let store = MemoryStore::new();
        let account = store.create(pending_account()).await.unwrap();

        assert!(store.approve_pending(account.id, dec!(100000)).await.unwrap());
        assert!(!store.approve_pending(account.id, dec!(100000)).await.unwrap());

        let row = store.account(account.id).unwrap();
        assert_eq!(row.account_type, "agent");
        assert_eq!(row.balance, dec!(100000));
    }

    #[tokio::test]
    async fn toggle_block_requires_agent() {
        let store = MemoryStore::new();
        let account = store.create(pending_account()).await.unwrap();

        assert_eq!(store.toggle_block(account.id).await.unwrap(), None);

        store.approve_pending(account.id, dec!(100000)).await.unwrap();
        assert_eq!(store.toggle_block(account.id).await.unwrap(), Some(true));
        assert_eq!(store.toggle_block(account.id).await.unwrap(), Some(false));
    }
}
