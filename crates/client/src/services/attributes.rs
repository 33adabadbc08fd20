//! Attribute taxonomies (colors, sizes, materials, ...).
//!
//! Every taxonomy shares the same shape and endpoints; the [`AttributeKind`]
//! selects the collection.

use threadline_core::AttributeId;
use threadline_core::models::{AttributeInput, AttributeKind, AttributeValue, Page};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// Attribute value endpoints.
#[derive(Debug, Clone)]
pub struct AttributeService {
    client: ApiClient,
}

impl AttributeService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All values of one taxonomy.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn list(&self, kind: AttributeKind) -> Result<Vec<AttributeValue>, ApiError> {
        let page: Page<AttributeValue> = self.client.get(&endpoints::attributes(kind)).await?;
        Ok(page.items)
    }

    /// Add a value to a taxonomy.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(kind = %kind, name = %input.name))]
    pub async fn create(
        &self,
        kind: AttributeKind,
        input: &AttributeInput,
    ) -> Result<AttributeValue, ApiError> {
        self.client.post(&endpoints::attributes(kind), input).await
    }

    /// Update a taxonomy value.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(kind = %kind, attribute_id = %id))]
    pub async fn update(
        &self,
        kind: AttributeKind,
        id: &AttributeId,
        input: &AttributeInput,
    ) -> Result<AttributeValue, ApiError> {
        self.client.put(&endpoints::attribute(kind, id), input).await
    }

    /// Delete a taxonomy value.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(kind = %kind, attribute_id = %id))]
    pub async fn delete(&self, kind: AttributeKind, id: &AttributeId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::attribute(kind, id)).await
    }
}
