//! Request handlers

pub mod account;
pub mod agent;
pub mod auth;
pub mod health;
