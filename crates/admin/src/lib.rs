//! Threadline Admin - Back-office screens over the commerce backend.
//!
//! Every catalog resource is managed through the same [`CrudScreen`]: a list
//! backed by a [`DataTableConfig`](components::DataTableConfig), one open form
//! at a time, and deletes that need an explicit
//! [`PendingDelete::confirm`](confirm::PendingDelete::confirm) before the
//! backend is called. Orders have their own [`OrdersScreen`](orders::OrdersScreen)
//! because they are never created or deleted from the back office.
//!
//! # Example
//!
//! ```rust,no_run
//! use threadline_admin::resources::Brands;
//! use threadline_admin::CrudScreen;
//! use threadline_client::{ApiClient, ClientConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new(&ClientConfig::from_env()?)?;
//! let mut brands = CrudScreen::new(Brands::new(client));
//! brands.load().await?;
//!
//! let form = brands.open_create()?;
//! form.name = "Northbound".into();
//! let brand = brands.submit().await?;
//!
//! let pending = brands.request_delete(&brand.id)?;
//! brands.confirm_delete(pending.confirm()).await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod components;
pub mod confirm;
mod error;
pub mod forms;
pub mod orders;
mod resource;
pub mod resources;

pub use error::{AdminError, Result};
pub use resource::{CrudScreen, EditMode, IdOf, Resource};
