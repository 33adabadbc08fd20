//! Products, variants and catalog queries.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::attribute::{AttributeKind, AttributeValue};
use super::brand::Brand;
use super::category::Category;
use super::default_true;
use crate::types::{AttributeId, BrandId, CategoryId, Entity, ProductId, Ref, VariantId};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<Ref<Brand>>,
    #[serde(default)]
    pub category: Option<Ref<Category>>,
    #[serde(default, with = "rust_decimal::serde::float", alias = "basePrice")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option", alias = "discountPrice")]
    pub sale_price: Option<Decimal>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub gender: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub material: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub fit: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub pattern: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub shoe_height: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub occasion: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub collar_type: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub season: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub style: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// The price a shopper pays: the sale price when it undercuts the base.
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }

    /// Whether a sale price below the base price is set.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.effective_price() < self.price
    }

    /// The product-level value for a taxonomy, if set.
    ///
    /// Size and color live on variants and always return `None` here.
    #[must_use]
    pub const fn attribute(&self, kind: AttributeKind) -> Option<&Ref<AttributeValue>> {
        match kind {
            AttributeKind::Gender => self.gender.as_ref(),
            AttributeKind::Material => self.material.as_ref(),
            AttributeKind::Fit => self.fit.as_ref(),
            AttributeKind::Pattern => self.pattern.as_ref(),
            AttributeKind::ShoeHeight => self.shoe_height.as_ref(),
            AttributeKind::Occasion => self.occasion.as_ref(),
            AttributeKind::CollarType => self.collar_type.as_ref(),
            AttributeKind::Season => self.season.as_ref(),
            AttributeKind::Style => self.style.as_ref(),
            AttributeKind::Color | AttributeKind::Size => None,
        }
    }

    /// Look up a variant by id.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| &v.id == id)
    }

    /// Find the variant matching a size and color selection.
    ///
    /// A `None` selection matches variants that have no value for that axis.
    #[must_use]
    pub fn find_variant(
        &self,
        size: Option<&AttributeId>,
        color: Option<&AttributeId>,
    ) -> Option<&Variant> {
        self.variants.iter().find(|v| {
            v.size.as_ref().map(Ref::id) == size && v.color.as_ref().map(Ref::id) == color
        })
    }

    /// Whether any unit can be bought.
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.variants.is_empty() || self.variants.iter().any(Variant::in_stock)
    }

    /// First image, used for listings.
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &ProductId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A purchasable SKU: a product in a specific size and color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(rename = "_id", alias = "id")]
    pub id: VariantId,
    #[serde(default, alias = "productId")]
    pub product: Option<ProductId>,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub size: Option<Ref<AttributeValue>>,
    #[serde(default)]
    pub color: Option<Ref<AttributeValue>>,
    /// Overrides the product price when set.
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    #[serde(default, alias = "quantity")]
    pub stock: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

impl Variant {
    /// Whether at least one unit is available.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// "M / Navy" style label built from whatever is populated.
    #[must_use]
    pub fn option_label(&self) -> String {
        let parts: Vec<String> = [self.size.as_ref(), self.color.as_ref()]
            .into_iter()
            .flatten()
            .map(Ref::label_or_id)
            .collect();
        if parts.is_empty() {
            self.sku.clone()
        } else {
            parts.join(" / ")
        }
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &VariantId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.sku
    }
}

/// Create/update payload for a product. Images travel as separate uploads.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub brand: BrandId,
    pub category: CategoryId,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub sale_price: Option<Decimal>,
    /// Product-level taxonomy selections, sent as `{"material": "<id>", ...}`.
    #[serde(flatten)]
    pub attributes: BTreeMap<AttributeKind, AttributeId>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Create/update payload for a variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<AttributeId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<AttributeId>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub price: Option<Decimal>,
    pub stock: u32,
}

/// Sort order for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl ProductSort {
    /// Query-string value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
        }
    }
}

impl std::str::FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "newest" => Ok(Self::Newest),
            "price_asc" | "price" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name_asc" | "name" => Ok(Self::NameAsc),
            _ => Err(format!("invalid sort: {s}")),
        }
    }
}

/// Filters for the product listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub brand: Option<BrandId>,
    pub gender: Option<AttributeId>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub featured: Option<bool>,
    pub sort: Option<ProductSort>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductQuery {
    /// Query-string pairs for the set filters, in a stable order.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(brand) = &self.brand {
            pairs.push(("brand", brand.to_string()));
        }
        if let Some(gender) = &self.gender {
            pairs.push(("gender", gender.to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        if let Some(featured) = self.featured {
            pairs.push(("featured", featured.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_owned()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}
