//! Brands.

use threadline_core::BrandId;
use threadline_core::models::{Brand, BrandInput, Page};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::upload::{ImageUpload, multipart_form};

/// Brand endpoints.
#[derive(Debug, Clone)]
pub struct BrandService {
    client: ApiClient,
}

impl BrandService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All brands.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Brand>, ApiError> {
        let page: Page<Brand> = self.client.get(endpoints::BRANDS).await?;
        Ok(page.items)
    }

    /// Get a brand by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the brand is not found or the API request fails.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn get(&self, id: &BrandId) -> Result<Brand, ApiError> {
        self.client.get(&endpoints::brand(id)).await
    }

    /// Create a brand, optionally with a logo.
    ///
    /// # Errors
    ///
    /// Returns error if the logo cannot be attached or the API request fails.
    #[instrument(skip(self, input, logo), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: &BrandInput,
        logo: Option<ImageUpload>,
    ) -> Result<Brand, ApiError> {
        match logo {
            None => self.client.post(endpoints::BRANDS, input).await,
            Some(logo) => {
                let form = multipart_form(input, "logo", vec![logo])?;
                self.client.post_multipart(endpoints::BRANDS, form).await
            }
        }
    }

    /// Update a brand, optionally replacing its logo.
    ///
    /// # Errors
    ///
    /// Returns error if the logo cannot be attached or the API request fails.
    #[instrument(skip(self, input, logo), fields(brand_id = %id))]
    pub async fn update(
        &self,
        id: &BrandId,
        input: &BrandInput,
        logo: Option<ImageUpload>,
    ) -> Result<Brand, ApiError> {
        let path = endpoints::brand(id);
        match logo {
            None => self.client.put(&path, input).await,
            Some(logo) => {
                let form = multipart_form(input, "logo", vec![logo])?;
                self.client.put_multipart(&path, form).await
            }
        }
    }

    /// Delete a brand.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(brand_id = %id))]
    pub async fn delete(&self, id: &BrandId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::brand(id)).await
    }
}
