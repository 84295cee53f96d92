//! Data transfer objects

mod account;
mod auth;

pub use account::*;
pub use auth::*;
