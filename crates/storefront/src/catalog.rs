//! Catalog browsing: home page, listings and the product page.

use rust_decimal::Decimal;
use threadline_client::ApiClient;
use threadline_core::models::{AttributeValue, Category, Page, Product, ProductQuery, Variant};
use threadline_core::{AttributeId, CurrencyCode, Price, Ref};
use tracing::{instrument, warn};

use crate::error::Result;

/// Home page content.
#[derive(Debug, Clone, Default)]
pub struct HomePage {
    pub featured: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Catalog pages.
#[derive(Debug, Clone)]
pub struct Catalog {
    client: ApiClient,
}

impl Catalog {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Featured products and active categories, fetched concurrently.
    ///
    /// # Errors
    ///
    /// Returns error if either request fails.
    #[instrument(skip(self))]
    pub async fn home(&self) -> Result<HomePage> {
        let products = self.client.products();
        let categories = self.client.categories();
        let (featured, categories) = tokio::join!(products.featured(), categories.list());

        Ok(HomePage {
            featured: featured?,
            categories: categories?.into_iter().filter(|c| c.is_active).collect(),
        })
    }

    /// A page of products matching `query`.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn browse(&self, query: &ProductQuery) -> Result<Page<Product>> {
        Ok(self.client.products().list(query).await?)
    }

    /// The product page for `slug`.
    ///
    /// # Errors
    ///
    /// Returns error if the product is not found or the request fails.
    #[instrument(skip(self))]
    pub async fn product(&self, slug: &str) -> Result<ProductPage> {
        let mut product = self.client.products().get_by_slug(slug).await?;
        if product.variants.is_empty() {
            match self.client.products().variants(&product.id).await {
                Ok(variants) => product.variants = variants,
                Err(e) => warn!(product_id = %product.id, error = %e, "Could not load variants"),
            }
        }
        Ok(ProductPage::new(product))
    }
}

/// Stock state of the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    /// Units available.
    InStock(u32),
    /// Sold without variants; stock is not tracked.
    Available,
    /// The combination exists but has no stock.
    OutOfStock,
    /// No variant matches the chosen size and color.
    Unavailable,
    /// The product has variants and not every axis is chosen yet.
    ChooseOptions,
}

impl Availability {
    /// Whether the add-to-cart button should be enabled.
    #[must_use]
    pub const fn can_add(self) -> bool {
        matches!(self, Self::InStock(_) | Self::Available)
    }
}

/// A product page with the shopper's size and color selection.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub product: Product,
    size: Option<AttributeId>,
    color: Option<AttributeId>,
}

impl ProductPage {
    /// Start with nothing selected, or the only variant when there is one.
    #[must_use]
    pub fn new(product: Product) -> Self {
        let (size, color) = match product.variants.as_slice() {
            [only] => (
                only.size.as_ref().map(|r| r.id().clone()),
                only.color.as_ref().map(|r| r.id().clone()),
            ),
            _ => (None, None),
        };
        Self {
            product,
            size,
            color,
        }
    }

    /// Distinct sizes offered, in variant order.
    #[must_use]
    pub fn sizes(&self) -> Vec<&Ref<AttributeValue>> {
        distinct(self.product.variants.iter().filter_map(|v| v.size.as_ref()))
    }

    /// Distinct colors offered, in variant order.
    #[must_use]
    pub fn colors(&self) -> Vec<&Ref<AttributeValue>> {
        distinct(self.product.variants.iter().filter_map(|v| v.color.as_ref()))
    }

    /// Change the selection and return the resulting availability.
    pub fn select_variant(
        &mut self,
        size: Option<AttributeId>,
        color: Option<AttributeId>,
    ) -> Availability {
        self.size = size;
        self.color = color;
        self.availability()
    }

    /// The variant matching the current selection.
    #[must_use]
    pub fn selected(&self) -> Option<&Variant> {
        self.product
            .find_variant(self.size.as_ref(), self.color.as_ref())
    }

    /// Stock state of the current selection.
    #[must_use]
    pub fn availability(&self) -> Availability {
        if self.product.variants.is_empty() {
            return if self.product.is_active {
                Availability::Available
            } else {
                Availability::Unavailable
            };
        }
        let needs_size = !self.sizes().is_empty() && self.size.is_none();
        let needs_color = !self.colors().is_empty() && self.color.is_none();
        if needs_size || needs_color {
            return Availability::ChooseOptions;
        }
        match self.selected() {
            Some(variant) if variant.in_stock() => Availability::InStock(variant.stock),
            Some(_) => Availability::OutOfStock,
            None => Availability::Unavailable,
        }
    }

    /// Unit price for the current selection.
    #[must_use]
    pub fn unit_price(&self) -> Decimal {
        self.selected()
            .and_then(|v| v.price)
            .unwrap_or_else(|| self.product.effective_price())
    }

    /// Unit price formatted for display.
    #[must_use]
    pub fn price_label(&self) -> String {
        Price::new(self.unit_price(), CurrencyCode::default()).display()
    }
}

fn distinct<'a>(refs: impl Iterator<Item = &'a Ref<AttributeValue>>) -> Vec<&'a Ref<AttributeValue>> {
    let mut out: Vec<&Ref<AttributeValue>> = Vec::new();
    for r in refs {
        if !out.iter().any(|seen| seen.id() == r.id()) {
            out.push(r);
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn page() -> ProductPage {
        let product: Product = serde_json::from_value(json!({
            "_id": "p1",
            "name": "Chore Coat",
            "price": 120,
            "variants": [
                {"_id": "v1", "sku": "CC-M-OL", "size": {"_id": "m", "name": "M"},
                 "color": {"_id": "olive", "name": "Olive"}, "stock": 3},
                {"_id": "v2", "sku": "CC-L-OL", "size": {"_id": "l", "name": "L"},
                 "color": {"_id": "olive", "name": "Olive"}, "stock": 0, "price": 130},
                {"_id": "v3", "sku": "CC-M-NV", "size": {"_id": "m", "name": "M"},
                 "color": {"_id": "navy", "name": "Navy"}, "stock": 1}
            ]
        }))
        .unwrap();
        ProductPage::new(product)
    }

    #[test]
    fn test_option_lists_are_distinct() {
        let page = page();
        let sizes: Vec<String> = page.sizes().into_iter().map(Ref::label_or_id).collect();
        let colors: Vec<String> = page.colors().into_iter().map(Ref::label_or_id).collect();
        assert_eq!(sizes, ["M", "L"]);
        assert_eq!(colors, ["Olive", "Navy"]);
    }

    #[test]
    fn test_selection_drives_availability() {
        let mut page = page();
        assert_eq!(page.availability(), Availability::ChooseOptions);

        let m = AttributeId::new("m");
        let l = AttributeId::new("l");
        let olive = AttributeId::new("olive");
        let navy = AttributeId::new("navy");

        assert_eq!(
            page.select_variant(Some(m.clone()), Some(olive.clone())),
            Availability::InStock(3)
        );
        assert_eq!(page.selected().unwrap().sku, "CC-M-OL");
        assert_eq!(
            page.select_variant(Some(l.clone()), Some(olive)),
            Availability::OutOfStock
        );
        assert_eq!(page.select_variant(Some(l), Some(navy)), Availability::Unavailable);
        assert!(!page.availability().can_add());
        assert_eq!(page.select_variant(Some(m), None), Availability::ChooseOptions);
    }

    #[test]
    fn test_variant_price_overrides_product() {
        let mut page = page();
        assert_eq!(page.unit_price(), Decimal::from(120));
        page.select_variant(Some(AttributeId::new("l")), Some(AttributeId::new("olive")));
        assert_eq!(page.unit_price(), Decimal::from(130));
        assert_eq!(page.price_label(), "$130.00");
    }

    #[test]
    fn test_single_variant_is_preselected() {
        let product: Product = serde_json::from_value(json!({
            "_id": "p2",
            "name": "Tote",
            "price": 25,
            "variants": [{"_id": "v9", "sku": "TOTE", "stock": 5}]
        }))
        .unwrap();
        let page = ProductPage::new(product);
        assert_eq!(page.availability(), Availability::InStock(5));
    }
}
