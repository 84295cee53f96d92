//! Repository implementations backed by PostgreSQL

mod account;
mod transaction;

pub use account::AccountRepo;
pub use transaction::TransactionRepo;
