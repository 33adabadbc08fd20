//! Threadline Core - Shared types library.
//!
//! This crate provides the entity shapes used across all Threadline components:
//! - `client` - Typed wrapper over the REST backend
//! - `storefront` - Catalog, cart and checkout flows
//! - `admin` - Back-office CRUD screens
//! - `cli` - Command-line front end for both
//!
//! # Architecture
//!
//! The core crate contains only types and pure validation helpers - no I/O,
//! no HTTP clients. The REST backend owns every consistency rule; these types
//! only describe the records it exchanges.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, relations, money, emails and statuses
//! - [`models`] - REST resource shapes (products, carts, orders, ...)
//! - [`forms`] - Required-field validation shared by storefront and admin forms

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod forms;
pub mod models;
pub mod types;

pub use forms::{FieldError, FormErrors};
pub use types::*;
