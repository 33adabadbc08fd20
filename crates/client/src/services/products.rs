//! Catalog products and their variants.

use threadline_core::models::{Page, Product, ProductInput, ProductQuery, Variant, VariantInput};
use threadline_core::{ProductId, VariantId};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::upload::{ImageUpload, multipart_form};

/// Multipart field carrying product images.
const IMAGES_FIELD: &str = "images";

/// Product endpoints.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: ApiClient,
}

impl ProductService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        self.client
            .get_with_query(endpoints::PRODUCTS, &query.to_pairs())
            .await
    }

    /// Products flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn featured(&self) -> Result<Vec<Product>, ApiError> {
        let page: Page<Product> = self.client.get(endpoints::PRODUCTS_FEATURED).await?;
        Ok(page.items)
    }

    /// Get a single product by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.client.get(&endpoints::product(id)).await
    }

    /// Get a single product by its URL slug.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the API request fails.
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str) -> Result<Product, ApiError> {
        self.client.get(&endpoints::product_by_slug(slug)).await
    }

    /// Create a product. With images attached the body is sent as multipart.
    ///
    /// # Errors
    ///
    /// Returns error if an image cannot be attached or the API request fails.
    #[instrument(skip(self, input, images), fields(name = %input.name, images = images.len()))]
    pub async fn create(
        &self,
        input: &ProductInput,
        images: Vec<ImageUpload>,
    ) -> Result<Product, ApiError> {
        if images.is_empty() {
            return self.client.post(endpoints::PRODUCTS, input).await;
        }
        let form = multipart_form(input, IMAGES_FIELD, images)?;
        self.client.post_multipart(endpoints::PRODUCTS, form).await
    }

    /// Update a product. With images attached the body is sent as multipart.
    ///
    /// # Errors
    ///
    /// Returns error if an image cannot be attached or the API request fails.
    #[instrument(skip(self, input, images), fields(product_id = %id, images = images.len()))]
    pub async fn update(
        &self,
        id: &ProductId,
        input: &ProductInput,
        images: Vec<ImageUpload>,
    ) -> Result<Product, ApiError> {
        let path = endpoints::product(id);
        if images.is_empty() {
            return self.client.put(&path, input).await;
        }
        let form = multipart_form(input, IMAGES_FIELD, images)?;
        self.client.put_multipart(&path, form).await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: &ProductId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::product(id)).await
    }

    // =========================================================================
    // Variants
    // =========================================================================

    /// Variants of a product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn variants(&self, product_id: &ProductId) -> Result<Vec<Variant>, ApiError> {
        self.client.get(&endpoints::variants(product_id)).await
    }

    /// Add a variant to a product.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(product_id = %product_id, sku = %input.sku))]
    pub async fn create_variant(
        &self,
        product_id: &ProductId,
        input: &VariantInput,
    ) -> Result<Variant, ApiError> {
        self.client.post(&endpoints::variants(product_id), input).await
    }

    /// Update a variant.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(product_id = %product_id, variant_id = %variant_id))]
    pub async fn update_variant(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
        input: &VariantInput,
    ) -> Result<Variant, ApiError> {
        self.client
            .put(&endpoints::variant(product_id, variant_id), input)
            .await
    }

    /// Remove a variant.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id, variant_id = %variant_id))]
    pub async fn delete_variant(
        &self,
        product_id: &ProductId,
        variant_id: &VariantId,
    ) -> Result<(), ApiError> {
        self.client
            .delete(&endpoints::variant(product_id, variant_id))
            .await
    }
}
