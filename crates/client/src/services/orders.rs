//! Checkout and order management.

use threadline_core::OrderId;
use threadline_core::models::{
    CheckoutRequest, Order, OrderFilter, OrderStatusUpdate, Page, PaymentConfirmation,
};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// Order endpoints.
#[derive(Debug, Clone)]
pub struct OrderService {
    client: ApiClient,
}

impl OrderService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Create a pending order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the checkout or the request fails.
    #[instrument(skip(self, request), fields(payment_method = %request.payment_method))]
    pub async fn initiate_checkout(&self, request: &CheckoutRequest) -> Result<Order, ApiError> {
        self.client.post(endpoints::CHECKOUT, request).await
    }

    /// Record a captured payment against a pending order.
    ///
    /// # Errors
    ///
    /// Returns error if the backend rejects the payment or the request fails.
    #[instrument(skip(self, confirmation), fields(order_id = %id))]
    pub async fn confirm_payment(
        &self,
        id: &OrderId,
        confirmation: &PaymentConfirmation,
    ) -> Result<Order, ApiError> {
        self.client
            .post(&endpoints::order_payment(id), confirmation)
            .await
    }

    /// The signed-in shopper's orders.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        let page: Page<Order> = self.client.get(endpoints::MY_ORDERS).await?;
        Ok(page.items)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the order is not found or the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.client.get(&endpoints::order(id)).await
    }

    /// All orders matching `filter` (admin).
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &OrderFilter) -> Result<Page<Order>, ApiError> {
        self.client
            .get_with_query(endpoints::ORDERS, &filter.to_pairs())
            .await
    }

    /// Move an order to a new status (admin).
    ///
    /// # Errors
    ///
    /// Returns error if the transition is rejected or the request fails.
    #[instrument(skip(self, update), fields(order_id = %id, status = %update.status))]
    pub async fn update_status(
        &self,
        id: &OrderId,
        update: &OrderStatusUpdate,
    ) -> Result<Order, ApiError> {
        self.client.patch(&endpoints::order_status(id), update).await
    }

    /// Cancel an order.
    ///
    /// # Errors
    ///
    /// Returns error if the order can no longer be cancelled or the request
    /// fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn cancel(&self, id: &OrderId) -> Result<Order, ApiError> {
        self.client
            .post(&endpoints::order_cancel(id), &serde_json::json!({}))
            .await
    }
}
