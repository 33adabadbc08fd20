//! Threadline Client - Typed wrapper over the commerce REST backend.
//!
//! Every backend resource gets one service with one method per endpoint.
//! Services do no caching, retrying or deduplication: each call is a single
//! request whose failure is returned to the caller as an [`ApiError`].
//!
//! # Example
//!
//! ```rust,no_run
//! use threadline_client::{ApiClient, ClientConfig};
//! use threadline_core::models::ProductQuery;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! let page = client.products().list(&ProductQuery::default()).await?;
//! for product in &page.items {
//!     tracing::info!(name = %product.name, "product");
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod client;
mod config;
pub mod endpoints;
mod error;
pub mod services;
mod upload;

pub use client::ApiClient;
pub use config::{ClientConfig, ConfigError};
pub use error::ApiError;
pub use services::{
    AttributeService, BrandService, CartService, CategoryService, DeliveryService,
    OrderService, ProductService, UserService,
};
pub use upload::ImageUpload;
