//! Products.

use std::collections::BTreeMap;

use futures::future::try_join_all;
use threadline_client::{ApiClient, ImageUpload};
use threadline_core::forms::{optional, slugify};
use threadline_core::models::{
    AttributeKind, AttributeValue, Brand, Category, Product, ProductInput, ProductQuery,
};
use threadline_core::{
    AttributeId, BrandId, CategoryId, CurrencyCode, Entity, FormErrors, Price, ProductId, Ref,
};
use tracing::{info, instrument, warn};

use crate::components::{DataTableConfig, TableRow, products_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::Result;
use crate::forms::{FormModel, status_label};
use crate::resource::Resource;

/// Page size used when walking the full product list.
const LIST_PAGE_SIZE: u32 = 100;

/// Upper bound on pages fetched by one listing walk.
const MAX_LIST_PAGES: u32 = 50;

/// Product create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductForm {
    pub name: String,
    /// Derived from the name when left blank.
    pub slug: String,
    pub description: String,
    /// Brand id.
    pub brand: String,
    /// Category id.
    pub category: String,
    pub price: String,
    /// Blank for no sale.
    pub sale_price: String,
    /// Product-level taxonomy selections by attribute id; blank entries are
    /// ignored.
    pub attributes: BTreeMap<AttributeKind, String>,
    pub is_active: bool,
    pub is_featured: bool,
    /// Images to upload with the save.
    pub images: Vec<ImageUpload>,
    /// Current image URLs, for display only.
    pub current_images: Vec<String>,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            slug: String::new(),
            description: String::new(),
            brand: String::new(),
            category: String::new(),
            price: String::new(),
            sale_price: String::new(),
            attributes: BTreeMap::new(),
            is_active: true,
            is_featured: false,
            images: Vec::new(),
            current_images: Vec::new(),
        }
    }
}

fn ref_id<T: Entity>(r: Option<&Ref<T>>) -> String {
    r.map(|r| r.id().to_string()).unwrap_or_default()
}

impl FormModel for ProductForm {
    type Record = Product;
    type Output = (ProductInput, Vec<ImageUpload>);

    fn from_record(product: &Product) -> Self {
        let attributes = AttributeKind::PRODUCT_LEVEL
            .into_iter()
            .filter_map(|kind| {
                product
                    .attribute(kind)
                    .map(|value| (kind, value.id().as_str().to_owned()))
            })
            .collect();
        Self {
            name: product.name.clone(),
            slug: product.slug.clone(),
            description: product.description.clone().unwrap_or_default(),
            brand: ref_id(product.brand.as_ref()),
            category: ref_id(product.category.as_ref()),
            price: product.price.to_string(),
            sale_price: product
                .sale_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            attributes,
            is_active: product.is_active,
            is_featured: product.is_featured,
            images: Vec::new(),
            current_images: product.images.clone(),
        }
    }

    fn validate(&self) -> std::result::Result<Self::Output, FormErrors> {
        let mut errors = FormErrors::new();
        let name = errors.required("name", &self.name);
        let slug = optional(&self.slug).unwrap_or_else(|| slugify(&name));
        let brand = errors.selected("brand", optional(&self.brand).as_ref());
        let category = errors.selected("category", optional(&self.category).as_ref());
        let price = errors.decimal("price", &self.price);
        let sale_price = errors.optional_decimal("sale_price", &self.sale_price);
        if sale_price.is_some_and(|sale| sale >= price) && errors.get("price").is_none() {
            errors.push("sale_price", "sale price must be below the price");
        }
        if let Some(kind) = self
            .attributes
            .keys()
            .find(|kind| !AttributeKind::PRODUCT_LEVEL.contains(kind))
        {
            errors.push("attributes", format!("{kind} is set on variants, not products"));
        }

        match (brand, category) {
            (Some(brand), Some(category)) if errors.is_empty() => {
                let input = ProductInput {
                    name,
                    slug,
                    description: optional(&self.description),
                    brand: BrandId::new(brand),
                    category: CategoryId::new(category),
                    price,
                    sale_price,
                    attributes: self
                        .attributes
                        .iter()
                        .filter_map(|(kind, id)| optional(id).map(|id| (*kind, AttributeId::new(id))))
                        .collect(),
                    is_active: self.is_active,
                    is_featured: self.is_featured,
                };
                Ok((input, self.images.clone()))
            }
            _ => Err(errors),
        }
    }
}

/// Choices offered by the product form.
#[derive(Debug, Clone, Default)]
pub struct ProductFormOptions {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub attributes: BTreeMap<AttributeKind, Vec<AttributeValue>>,
}

impl ProductFormOptions {
    /// Fetch categories, brands and every taxonomy concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    #[instrument(skip(client))]
    pub async fn load(client: &ApiClient) -> Result<Self> {
        let categories = client.categories();
        let brands = client.brands();
        let attributes = client.attributes();
        let attributes = &attributes;

        let (categories, brands, values) = tokio::try_join!(
            categories.list(),
            brands.list(),
            try_join_all(AttributeKind::ALL.into_iter().map(|kind| async move {
                attributes.list(kind).await.map(|values| (kind, values))
            })),
        )?;

        info!(
            categories = categories.len(),
            brands = brands.len(),
            "Loaded product form options"
        );
        Ok(Self {
            categories,
            brands,
            attributes: values.into_iter().collect(),
        })
    }

    /// Values of one taxonomy.
    #[must_use]
    pub fn values(&self, kind: AttributeKind) -> &[AttributeValue] {
        self.attributes.get(&kind).map(Vec::as_slice).unwrap_or_default()
    }

    /// Check that the form's selections exist among the options.
    ///
    /// # Errors
    ///
    /// Returns every selection that does not match a loaded option.
    pub fn check(&self, form: &ProductForm) -> std::result::Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        let brand = form.brand.trim();
        if !brand.is_empty() && !self.brands.iter().any(|b| b.id.as_str() == brand) {
            errors.push("brand", format!("unknown brand {brand}"));
        }
        let category = form.category.trim();
        if !category.is_empty() && !self.categories.iter().any(|c| c.id.as_str() == category) {
            errors.push("category", format!("unknown category {category}"));
        }
        for (kind, id) in &form.attributes {
            let id = id.trim();
            if !id.is_empty() && !self.values(*kind).iter().any(|v| v.id.as_str() == id) {
                errors.push("attributes", format!("unknown {} {id}", kind.label().to_lowercase()));
            }
        }
        errors.into_result()
    }
}

/// The products collection.
#[derive(Debug, Clone)]
pub struct Products {
    client: ApiClient,
}

impl Products {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Choices for the product form.
    ///
    /// # Errors
    ///
    /// Returns error if any option list fails to load.
    pub async fn form_options(&self) -> Result<ProductFormOptions> {
        ProductFormOptions::load(&self.client).await
    }
}

impl Resource for Products {
    type Record = Product;
    type Form = ProductForm;

    const NAME: &'static str = "product";

    fn table(&self) -> DataTableConfig {
        products_table_config()
    }

    fn row(&self, product: &Product) -> TableRow {
        let label = |r: Option<String>| r.unwrap_or_else(|| "-".to_owned());
        TableRow::new(product.id.as_str())
            .cell("name", &product.name)
            .cell("slug", &product.slug)
            .cell("category", label(product.category.as_ref().map(Ref::label_or_id)))
            .cell("brand", label(product.brand.as_ref().map(Ref::label_or_id)))
            .cell(
                "price",
                Price::new(product.effective_price(), CurrencyCode::default()).display(),
            )
            .cell("variants", product.variants.len().to_string())
            .cell("status", status_label(product.is_active))
            .cell("featured", if product.is_featured { "Yes" } else { "No" })
    }

    fn blank_form(&self) -> ProductForm {
        ProductForm::default()
    }

    /// Walks every page of the listing.
    async fn list(&self) -> Result<Vec<Product>> {
        let products = self.client.products();
        let mut query = ProductQuery {
            limit: Some(LIST_PAGE_SIZE),
            ..ProductQuery::default()
        };
        let mut all = Vec::new();
        for page in 1..=MAX_LIST_PAGES {
            query.page = Some(page);
            let batch = products.list(&query).await?;
            // A backend that ignores `page` keeps answering with page 1.
            if batch.items.is_empty() || batch.page < page {
                break;
            }
            let more = batch.has_next();
            all.extend(batch.items);
            if !more {
                break;
            }
            if page == MAX_LIST_PAGES {
                warn!(pages = MAX_LIST_PAGES, "Product listing truncated");
            }
        }
        Ok(all)
    }

    async fn create(&self, (input, images): (ProductInput, Vec<ImageUpload>)) -> Result<Product> {
        Ok(self.client.products().create(&input, images).await?)
    }

    async fn update(
        &self,
        id: &ProductId,
        (input, images): (ProductInput, Vec<ImageUpload>),
    ) -> Result<Product> {
        Ok(self.client.products().update(id, &input, images).await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<ProductId>) -> Result<()> {
        Ok(self.client.products().delete(target.id()).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;
    use threadline_client::ClientConfig;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn product() -> Product {
        serde_json::from_value(json!({
            "_id": "p1", "name": "Chore Coat", "slug": "chore-coat",
            "brand": {"_id": "b1", "name": "Northbound"}, "category": "c1",
            "price": 120, "salePrice": 99.5,
            "material": {"_id": "cotton", "name": "Cotton"}, "fit": "relaxed",
            "images": ["/img/coat.jpg"], "isFeatured": true
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_form_prefills_relations() {
        let form = ProductForm::from_record(&product());
        assert_eq!(form.brand, "b1");
        assert_eq!(form.category, "c1");
        assert_eq!(form.sale_price.parse::<Decimal>().unwrap(), Decimal::new(995, 1));
        assert_eq!(
            form.attributes.get(&AttributeKind::Material).map(String::as_str),
            Some("cotton")
        );
        assert_eq!(
            form.attributes.get(&AttributeKind::Fit).map(String::as_str),
            Some("relaxed")
        );
        assert!(form.is_featured);
        assert_eq!(form.current_images, ["/img/coat.jpg"]);
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let errors = ProductForm::default().validate().unwrap_err();
        for field in ["name", "brand", "category", "price"] {
            assert!(errors.get(field).is_some(), "{field} should fail");
        }
        assert_eq!(errors.get("brand"), Some("brand must be selected"));
    }

    #[test]
    fn test_sale_price_must_undercut() {
        let mut form = ProductForm::from_record(&product());
        form.sale_price = "150".into();
        assert_eq!(
            form.validate().unwrap_err().get("sale_price"),
            Some("sale price must be below the price")
        );
    }

    #[test]
    fn test_variant_axes_are_not_product_attributes() {
        let mut form = ProductForm::from_record(&product());
        form.attributes.insert(AttributeKind::Size, "m".into());
        assert!(form.validate().unwrap_err().get("attributes").is_some());
    }

    #[test]
    fn test_valid_form_builds_input() {
        let mut form = ProductForm::from_record(&product());
        form.slug = String::new();
        form.attributes.insert(AttributeKind::Season, "  ".into());
        let (input, images) = form.validate().unwrap();
        assert_eq!(input.slug, "chore-coat");
        assert_eq!(input.brand.as_str(), "b1");
        assert_eq!(input.attributes.len(), 2);
        assert!(!input.attributes.contains_key(&AttributeKind::Season));
        assert!(images.is_empty());
    }

    fn products(server: &MockServer) -> Products {
        Products::new(ApiClient::new(&ClientConfig::new(&server.uri()).unwrap()).unwrap())
    }

    fn listing(ids: &[&str], page: u32, pages: u32) -> serde_json::Value {
        let items: Vec<_> = ids
            .iter()
            .map(|id| json!({"_id": id, "name": id, "price": 10}))
            .collect();
        json!({"success": true, "data": items, "total": 5, "page": page, "pages": pages})
    }

    #[tokio::test]
    async fn test_list_walks_every_page() {
        let server = MockServer::start().await;
        for (page, ids) in [("1", vec!["p1", "p2"]), ("2", vec!["p3", "p4"]), ("3", vec!["p5"])] {
            let number: u32 = page.parse().unwrap();
            Mock::given(method("GET"))
                .and(path("/products"))
                .and(query_param("page", page))
                .and(query_param("limit", "100"))
                .respond_with(ResponseTemplate::new(200).set_body_json(listing(&ids, number, 3)))
                .expect(1)
                .mount(&server)
                .await;
        }

        let all = products(&server).list().await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2", "p3", "p4", "p5"]);
    }

    #[tokio::test]
    async fn test_list_stops_when_page_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["p1"], 1, 3)))
            .expect(2)
            .mount(&server)
            .await;

        let all = products(&server).list().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_list_stops_on_empty_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&["p1"], 1, 9)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(listing(&[], 2, 9)))
            .expect(1)
            .mount(&server)
            .await;

        let all = products(&server).list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[test]
    fn test_options_check_unknown_choices() {
        let options = ProductFormOptions {
            categories: Vec::new(),
            brands: vec![serde_json::from_value(json!({"_id": "b1", "name": "Northbound"})).unwrap()],
            attributes: BTreeMap::from([(
                AttributeKind::Material,
                vec![serde_json::from_value(json!({"_id": "cotton", "name": "Cotton"})).unwrap()],
            )]),
        };
        let errors = options.check(&ProductForm::from_record(&product())).unwrap_err();
        assert_eq!(errors.get("brand"), None);
        assert_eq!(errors.get("category"), Some("unknown category c1"));
        assert_eq!(errors.get("attributes"), Some("unknown fit relaxed"));
        assert_eq!(options.values(AttributeKind::Material).len(), 1);
        assert!(options.values(AttributeKind::Style).is_empty());
    }
}
