//! Categories.

use threadline_client::{ApiClient, ImageUpload};
use threadline_core::forms::{optional, slugify};
use threadline_core::models::{Category, CategoryInput};
use threadline_core::{CategoryId, FormErrors, Ref};

use crate::components::{DataTableConfig, TableRow, categories_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::Result;
use crate::forms::{FormModel, status_label};
use crate::resource::Resource;

/// Category create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    /// Derived from the name when left blank.
    pub slug: String,
    pub description: String,
    /// Parent category id; blank for a top-level category.
    pub parent: String,
    pub is_active: bool,
    /// New image; `None` keeps the current one.
    pub image: Option<ImageUpload>,
    /// Current image URL, for display only.
    pub current_image: Option<String>,
    editing: Option<CategoryId>,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            parent: String::new(),
            is_active: true,
            image: None,
            current_image: None,
            editing: None,
        }
    }
}

impl FormModel for CategoryForm {
    type Record = Category;
    type Output = (CategoryInput, Option<ImageUpload>);

    fn from_record(category: &Category) -> Self {
        Self {
            name: category.name.clone(),
            slug: category.slug.clone(),
            description: category.description.clone().unwrap_or_default(),
            parent: category
                .parent_id()
                .map(|id| id.as_str().to_owned())
                .unwrap_or_default(),
            is_active: category.is_active,
            image: None,
            current_image: category.image.clone(),
            editing: Some(category.id.clone()),
        }
    }

    fn validate(&self) -> std::result::Result<Self::Output, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let slug = optional(&self.slug).unwrap_or_else(|| slugify(&name));
        let parent = optional(&self.parent).map(CategoryId::new);
        if parent.is_some() && parent == self.editing {
            errors.push("parent", "a category cannot be its own parent");
        }
        errors.into_result().map(|()| {
            let input = CategoryInput {
                name,
                slug,
                description: optional(&self.description),
                parent,
                is_active: self.is_active,
            };
            (input, self.image.clone())
        })
    }
}

/// The categories collection.
#[derive(Debug, Clone)]
pub struct Categories {
    client: ApiClient,
}

impl Categories {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl Resource for Categories {
    type Record = Category;
    type Form = CategoryForm;

    const NAME: &'static str = "category";

    fn table(&self) -> DataTableConfig {
        categories_table_config()
    }

    fn row(&self, category: &Category) -> TableRow {
        let parent = category
            .parent
            .as_deref()
            .map_or_else(|| "-".to_owned(), Ref::label_or_id);
        TableRow::new(category.id.as_str())
            .cell("name", &category.name)
            .cell("slug", &category.slug)
            .cell("parent", parent)
            .cell("status", status_label(category.is_active))
    }

    fn blank_form(&self) -> CategoryForm {
        CategoryForm::default()
    }

    async fn list(&self) -> Result<Vec<Category>> {
        Ok(self.client.categories().list().await?)
    }

    async fn create(
        &self,
        (input, image): (CategoryInput, Option<ImageUpload>),
    ) -> Result<Category> {
        Ok(self.client.categories().create(&input, image).await?)
    }

    async fn update(
        &self,
        id: &CategoryId,
        (input, image): (CategoryInput, Option<ImageUpload>),
    ) -> Result<Category> {
        Ok(self.client.categories().update(id, &input, image).await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<CategoryId>) -> Result<()> {
        Ok(self.client.categories().delete(target.id()).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn boots() -> Category {
        serde_json::from_value(json!({
            "_id": "c2", "name": "Boots", "slug": "boots",
            "parent": {"_id": "c1", "name": "Shoes"}
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_form_keeps_parent_id() {
        let form = CategoryForm::from_record(&boots());
        assert_eq!(form.parent, "c1");
        assert!(form.is_active);
    }

    #[test]
    fn test_own_parent_is_rejected() {
        let mut form = CategoryForm::from_record(&boots());
        form.parent = "c2".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("parent"), Some("a category cannot be its own parent"));
    }

    #[test]
    fn test_blank_parent_is_top_level() {
        let form = CategoryForm {
            name: "Outerwear".into(),
            parent: "  ".into(),
            ..CategoryForm::default()
        };
        let (input, _) = form.validate().unwrap();
        assert_eq!(input.parent, None);
        assert_eq!(input.slug, "outerwear");
    }

    #[test]
    fn test_row_shows_parent_label() {
        let client = ApiClient::new(
            &threadline_client::ClientConfig::new("http://127.0.0.1:9").unwrap(),
        )
        .unwrap();
        let row = Categories::new(client).row(&boots());
        assert_eq!(row.get("parent"), Some("Shoes"));
        assert_eq!(row.get("status"), Some("Active"));
    }
}
