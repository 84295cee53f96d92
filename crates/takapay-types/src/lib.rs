//! TakaPay Types - Canonical domain types for the MFS backend
//!
//! This crate contains the foundational types for TakaPay with zero
//! dependencies on other takapay crates:
//!
//! - Account roles and the lifecycle edges between them
//! - Login identifier classification (email vs. mobile number)
//! - The balance seeding policy applied at registration and approval

pub mod identifier;
pub mod role;

pub use identifier::*;
pub use role::*;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Opening balance credited to a plain user account at registration.
pub const USER_SEED_BALANCE: Decimal = dec!(40);

/// Float credited to an agent account, either at direct registration or
/// when a pending application is approved.
pub const AGENT_SEED_BALANCE: Decimal = dec!(100000);

/// Seed balance for a given role at registration time.
///
/// Anything other than `user` or `agent` (notably a `pending` agent
/// application) starts at zero and is funded on approval.
pub fn seed_balance(role: AccountType) -> Decimal {
    match role {
        AccountType::User => USER_SEED_BALANCE,
        AccountType::Agent => AGENT_SEED_BALANCE,
        _ => Decimal::ZERO,
    }
}
