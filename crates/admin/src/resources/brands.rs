//! Brands.

use threadline_client::{ApiClient, ImageUpload};
use threadline_core::forms::{optional, slugify};
use threadline_core::models::{Brand, BrandInput};
use threadline_core::{BrandId, FormErrors};

use crate::components::{DataTableConfig, TableRow, brands_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::Result;
use crate::forms::{FormModel, status_label};
use crate::resource::Resource;

/// Brand create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandForm {
    pub name: String,
    /// Derived from the name when left blank.
    pub slug: String,
    pub description: String,
    pub is_active: bool,
    /// New logo; `None` keeps the current one.
    pub logo: Option<ImageUpload>,
    /// Current logo URL, for display only.
    pub current_logo: Option<String>,
}

impl Default for BrandForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            is_active: true,
            logo: None,
            current_logo: None,
        }
    }
}

impl FormModel for BrandForm {
    type Record = Brand;
    type Output = (BrandInput, Option<ImageUpload>);

    fn from_record(brand: &Brand) -> Self {
        Self {
            name: brand.name.clone(),
            slug: brand.slug.clone(),
            description: brand.description.clone().unwrap_or_default(),
            is_active: brand.is_active,
            logo: None,
            current_logo: brand.logo.clone(),
        }
    }

    fn validate(&self) -> std::result::Result<Self::Output, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let slug = optional(&self.slug).unwrap_or_else(|| slugify(&name));
        errors.into_result().map(|()| {
            let input = BrandInput {
                name,
                slug,
                description: optional(&self.description),
                is_active: self.is_active,
            };
            (input, self.logo.clone())
        })
    }
}

/// The brands collection.
#[derive(Debug, Clone)]
pub struct Brands {
    client: ApiClient,
}

impl Brands {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl Resource for Brands {
    type Record = Brand;
    type Form = BrandForm;

    const NAME: &'static str = "brand";

    fn table(&self) -> DataTableConfig {
        brands_table_config()
    }

    fn row(&self, brand: &Brand) -> TableRow {
        TableRow::new(brand.id.as_str())
            .cell("name", &brand.name)
            .cell("slug", &brand.slug)
            .cell("logo", brand.logo.as_deref().unwrap_or("-"))
            .cell("status", status_label(brand.is_active))
    }

    fn blank_form(&self) -> BrandForm {
        BrandForm::default()
    }

    async fn list(&self) -> Result<Vec<Brand>> {
        Ok(self.client.brands().list().await?)
    }

    async fn create(&self, (input, logo): (BrandInput, Option<ImageUpload>)) -> Result<Brand> {
        Ok(self.client.brands().create(&input, logo).await?)
    }

    async fn update(
        &self,
        id: &BrandId,
        (input, logo): (BrandInput, Option<ImageUpload>),
    ) -> Result<Brand> {
        Ok(self.client.brands().update(id, &input, logo).await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<BrandId>) -> Result<()> {
        Ok(self.client.brands().delete(target.id()).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use threadline_client::ClientConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::confirm::PendingDelete;
    use crate::{AdminError, CrudScreen, EditMode};

    fn brand() -> Brand {
        serde_json::from_value(json!({
            "_id": "b1", "name": "Northbound", "slug": "northbound",
            "logo": "/img/nb.png", "isActive": false
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_form_prefills_from_record() {
        let form = BrandForm::from_record(&brand());
        assert_eq!(form.name, "Northbound");
        assert_eq!(form.slug, "northbound");
        assert!(!form.is_active);
        assert_eq!(form.current_logo.as_deref(), Some("/img/nb.png"));
        assert!(form.logo.is_none());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let errors = BrandForm::default().validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("name is required"));
    }

    #[test]
    fn test_slug_defaults_to_name() {
        let form = BrandForm {
            name: "Salt & Pine".into(),
            ..BrandForm::default()
        };
        let (input, logo) = form.validate().unwrap();
        assert_eq!(input.slug, "salt-pine");
        assert_eq!(input.description, None);
        assert!(logo.is_none());
    }

    async fn screen(server: &MockServer) -> CrudScreen<Brands> {
        let client = ApiClient::new(&ClientConfig::new(&server.uri()).unwrap()).unwrap();
        CrudScreen::new(Brands::new(client))
    }

    #[tokio::test]
    async fn test_empty_list_shows_empty_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .mount(&server)
            .await;

        let mut screen = screen(&server).await;
        assert!(screen.load().await.unwrap().is_empty());
        let view = screen.list_view(None);
        assert_eq!(
            view.empty_state().map(|s| s.title.as_str()),
            Some("No brands yet")
        );
    }

    #[tokio::test]
    async fn test_invalid_submit_keeps_form_open() {
        let server = MockServer::start().await;
        let mut screen = screen(&server).await;

        screen.open_create().unwrap();
        let err = screen.submit().await.unwrap_err();
        assert!(matches!(err, AdminError::Form(_)));
        assert_eq!(screen.mode(), Some(&EditMode::Create));
        assert_eq!(screen.errors().and_then(|e| e.get("name")), Some("name is required"));
    }

    #[tokio::test]
    async fn test_confirmation_for_another_resource_is_refused() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([brand()])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/brands/b1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let mut screen = screen(&server).await;
        screen.load().await.unwrap();
        let foreign = PendingDelete::new("category", BrandId::new("b1"), "Northbound").confirm();
        let err = screen.confirm_delete(foreign).await.unwrap_err();

        assert!(matches!(
            err,
            AdminError::ConfirmationMismatch {
                resource: "brand",
                confirmed: "category"
            }
        ));
        assert_eq!(screen.records().len(), 1);
    }

    #[tokio::test]
    async fn test_edit_updates_list_in_place() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/brands"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([brand()])))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/brands/b1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"_id": "b1", "name": "Northbound Co", "slug": "northbound"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut screen = screen(&server).await;
        screen.load().await.unwrap();
        screen.open_edit(&BrandId::new("b1")).unwrap().name = "Northbound Co".into();
        let saved = screen.submit().await.unwrap();

        assert_eq!(saved.name, "Northbound Co");
        assert!(screen.form().is_none());
        assert_eq!(screen.records().len(), 1);
        assert_eq!(screen.find(&BrandId::new("b1")).unwrap().name, "Northbound Co");
    }
}
