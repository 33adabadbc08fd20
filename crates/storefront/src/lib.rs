//! Threadline Storefront - shopper-facing flows over the commerce backend.
//!
//! Each module is one storefront page reduced to its state and actions:
//! signing in, browsing the catalog, managing the cart, the checkout wizard
//! and the account area. Rendering is left to the caller.
//!
//! Browser storage is modelled by [`storage::SessionStore`], which keeps the
//! `token` and `user` keys in a persistent local scope and `checkoutData` in
//! a session scope.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod address;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod storage;

pub use error::{Result, StorefrontError};
