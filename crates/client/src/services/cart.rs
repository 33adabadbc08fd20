//! The signed-in shopper's cart. Every call requires a bearer token.

use threadline_core::CartItemId;
use threadline_core::models::{AddToCart, Cart, UpdateCartItem};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// Cart endpoints.
#[derive(Debug, Clone)]
pub struct CartService {
    client: ApiClient,
}

impl CartService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Current cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get(&self) -> Result<Cart, ApiError> {
        self.client.get(endpoints::CART).await
    }

    /// Add a line (or units to an existing line) and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn add_item(&self, item: &AddToCart) -> Result<Cart, ApiError> {
        self.client.post(endpoints::CART_ITEMS, item).await
    }

    /// Change a line's quantity and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn update_item(&self, id: &CartItemId, quantity: u32) -> Result<Cart, ApiError> {
        self.client
            .put(&endpoints::cart_item(id), &UpdateCartItem { quantity })
            .await
    }

    /// Remove a line and return the updated cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(item_id = %id))]
    pub async fn remove_item(&self, id: &CartItemId) -> Result<Cart, ApiError> {
        self.client.delete_returning(&endpoints::cart_item(id)).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.client.delete(endpoints::CART).await
    }
}
