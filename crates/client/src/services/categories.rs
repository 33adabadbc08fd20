//! Product categories.

use threadline_core::CategoryId;
use threadline_core::models::{Category, CategoryInput, Page};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;
use crate::upload::{ImageUpload, multipart_form};

/// Category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryService {
    client: ApiClient,
}

impl CategoryService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// All categories.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        let page: Page<Category> = self.client.get(endpoints::CATEGORIES).await?;
        Ok(page.items)
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the category is not found or the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn get(&self, id: &CategoryId) -> Result<Category, ApiError> {
        self.client.get(&endpoints::category(id)).await
    }

    /// Create a category, optionally with a banner image.
    ///
    /// # Errors
    ///
    /// Returns error if the image cannot be attached or the API request fails.
    #[instrument(skip(self, input, image), fields(name = %input.name))]
    pub async fn create(
        &self,
        input: &CategoryInput,
        image: Option<ImageUpload>,
    ) -> Result<Category, ApiError> {
        match image {
            None => self.client.post(endpoints::CATEGORIES, input).await,
            Some(image) => {
                let form = multipart_form(input, "image", vec![image])?;
                self.client.post_multipart(endpoints::CATEGORIES, form).await
            }
        }
    }

    /// Update a category, optionally replacing its image.
    ///
    /// # Errors
    ///
    /// Returns error if the image cannot be attached or the API request fails.
    #[instrument(skip(self, input, image), fields(category_id = %id))]
    pub async fn update(
        &self,
        id: &CategoryId,
        input: &CategoryInput,
        image: Option<ImageUpload>,
    ) -> Result<Category, ApiError> {
        let path = endpoints::category(id);
        match image {
            None => self.client.put(&path, input).await,
            Some(image) => {
                let form = multipart_form(input, "image", vec![image])?;
                self.client.put_multipart(&path, form).await
            }
        }
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::category(id)).await
    }
}
