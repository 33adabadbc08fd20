//! Account area: profile, address book and order history.

use threadline_client::ApiClient;
use threadline_core::FormErrors;
use threadline_core::forms::optional;
use threadline_core::models::{Address, AddressInput, Order, ProfileUpdate, User};
use threadline_core::{AddressId, OrderId};
use tracing::{info, instrument};

use crate::address::AddressForm;
use crate::error::Result;
use crate::storage::SessionStore;

/// Editable profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
}

impl ProfileForm {
    /// Pre-fill from the account.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            phone: user.phone.clone().unwrap_or_default(),
        }
    }

    /// Name is required; a blank phone clears it.
    ///
    /// # Errors
    ///
    /// Returns the failing fields.
    pub fn validate(&self) -> std::result::Result<ProfileUpdate, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        errors.into_result().map(|()| ProfileUpdate {
            name: Some(name),
            phone: optional(&self.phone),
        })
    }
}

/// Account pages for the signed-in shopper.
#[derive(Debug, Clone)]
pub struct Account {
    client: ApiClient,
    store: SessionStore,
}

impl Account {
    #[must_use]
    pub const fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// The shopper's profile, refreshed from the backend.
    ///
    /// # Errors
    ///
    /// Returns error if the request or storage fails.
    #[instrument(skip(self))]
    pub async fn profile(&self) -> Result<User> {
        let user = self.client.users().me().await?;
        self.store.set_user(&user)?;
        Ok(user)
    }

    /// Save profile changes and refresh the stored user.
    ///
    /// # Errors
    ///
    /// Returns `Form` for a blank name, or the backend error.
    #[instrument(skip(self, form))]
    pub async fn update_profile(&self, form: &ProfileForm) -> Result<User> {
        let update = form.validate()?;
        let user = self.client.users().update_me(&update).await?;
        self.store.set_user(&user)?;
        info!("Profile updated");
        Ok(user)
    }

    /// Saved addresses.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn addresses(&self) -> Result<Vec<Address>> {
        Ok(self.client.users().addresses().await?)
    }

    /// Save a new address.
    ///
    /// # Errors
    ///
    /// Returns `Form` with every missing field, or the backend error.
    #[instrument(skip(self, form))]
    pub async fn add_address(&self, form: &AddressForm, is_default: bool) -> Result<Address> {
        let input = AddressInput {
            address: form.validate()?,
            is_default,
        };
        Ok(self.client.users().add_address(&input).await?)
    }

    /// Replace a saved address.
    ///
    /// # Errors
    ///
    /// Returns `Form` with every missing field, or the backend error.
    #[instrument(skip(self, form), fields(address_id = %id))]
    pub async fn update_address(
        &self,
        id: &AddressId,
        form: &AddressForm,
        is_default: bool,
    ) -> Result<Address> {
        let input = AddressInput {
            address: form.validate()?,
            is_default,
        };
        Ok(self.client.users().update_address(id, &input).await?)
    }

    /// Delete a saved address.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn delete_address(&self, id: &AddressId) -> Result<()> {
        Ok(self.client.users().delete_address(id).await?)
    }

    /// Order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn orders(&self) -> Result<Vec<Order>> {
        let mut orders = self.client.orders().my_orders().await?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    /// One order.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn order(&self, id: &OrderId) -> Result<Order> {
        Ok(self.client.orders().get(id).await?)
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the order can no longer be cancelled.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel_order(&self, id: &OrderId) -> Result<Order> {
        let order = self.client.orders().cancel(id).await?;
        info!(status = %order.status, "Order cancelled");
        Ok(order)
    }
}
