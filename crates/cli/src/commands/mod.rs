//! Subcommand implementations.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod session;
pub mod shop;
