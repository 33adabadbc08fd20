//! Delivery options and postal-code serviceability.

use threadline_core::models::{DeliveryCheck, DeliveryOption};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// Delivery endpoints.
#[derive(Debug, Clone)]
pub struct DeliveryService {
    client: ApiClient,
}

impl DeliveryService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Available delivery options.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn options(&self) -> Result<Vec<DeliveryOption>, ApiError> {
        self.client.get(endpoints::DELIVERY_OPTIONS).await
    }

    /// Whether the backend delivers to `postal_code`.
    ///
    /// The postal code from the request is kept when the response omits it.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn check(&self, postal_code: &str) -> Result<DeliveryCheck, ApiError> {
        let mut check: DeliveryCheck = self
            .client
            .get(&endpoints::delivery_check(postal_code))
            .await?;
        if check.postal_code.is_empty() {
            postal_code.trim().clone_into(&mut check.postal_code);
        }
        Ok(check)
    }
}
