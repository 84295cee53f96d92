//! Application state shared across handlers

use std::sync::Arc;

use takapay_auth::AuthService;
use takapay_db::{AccountStore, TransactionStore};

/// Shared application state.
///
/// Handlers are written against the store traits so the same router runs on
/// PostgreSQL in production and on the in-memory store in tests.
#[derive(Clone)]
pub struct AppState {
    /// Identity store
    pub accounts: Arc<dyn AccountStore>,
    /// Read-only transaction store
    pub transactions: Arc<dyn TransactionStore>,
    /// Authentication service
    pub auth: Arc<AuthService>,
}

impl AppState {
    /// Create a new application state
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        transactions: Arc<dyn TransactionStore>,
        auth: Arc<AuthService>,
    ) -> Self {
        Self {
            accounts,
            transactions,
            auth,
        }
    }
}
