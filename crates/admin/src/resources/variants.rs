//! Variants of one product.

use threadline_client::ApiClient;
use threadline_core::forms::optional;
use threadline_core::models::{AttributeValue, Variant, VariantInput};
use threadline_core::{AttributeId, CurrencyCode, FormErrors, Price, ProductId, Ref, VariantId};

use crate::components::{DataTableConfig, TableRow, variants_table_config};
use crate::confirm::ConfirmedDelete;
use crate::error::Result;
use crate::forms::FormModel;
use crate::resource::Resource;

/// Variant create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantForm {
    pub sku: String,
    /// Size attribute id; blank for none.
    pub size: String,
    /// Color attribute id; blank for none.
    pub color: String,
    /// Blank uses the product price.
    pub price: String,
    pub stock: String,
}

impl FormModel for VariantForm {
    type Record = Variant;
    type Output = VariantInput;

    fn from_record(variant: &Variant) -> Self {
        let id_of = |r: Option<&Ref<AttributeValue>>| {
            r.map(|r| r.id().as_str().to_owned()).unwrap_or_default()
        };
        Self {
            sku: variant.sku.clone(),
            size: id_of(variant.size.as_ref()),
            color: id_of(variant.color.as_ref()),
            price: variant.price.map(|p| p.to_string()).unwrap_or_default(),
            stock: variant.stock.to_string(),
        }
    }

    fn validate(&self) -> std::result::Result<VariantInput, FormErrors> {
        let mut errors = FormErrors::new();
        let sku = errors.required("sku", &self.sku);
        let price = errors.optional_decimal("price", &self.price);
        let stock = errors.count("stock", &self.stock);
        errors.into_result().map(|()| VariantInput {
            sku,
            size: optional(&self.size).map(AttributeId::new),
            color: optional(&self.color).map(AttributeId::new),
            price,
            stock,
        })
    }
}

/// The variants collection of a product.
#[derive(Debug, Clone)]
pub struct Variants {
    client: ApiClient,
    product_id: ProductId,
}

impl Variants {
    #[must_use]
    pub const fn new(client: ApiClient, product_id: ProductId) -> Self {
        Self { client, product_id }
    }

    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product_id
    }
}

impl Resource for Variants {
    type Record = Variant;
    type Form = VariantForm;

    const NAME: &'static str = "variant";

    fn table(&self) -> DataTableConfig {
        variants_table_config()
    }

    fn row(&self, variant: &Variant) -> TableRow {
        let label = |r: Option<&Ref<AttributeValue>>| r.map_or_else(|| "-".to_owned(), Ref::label_or_id);
        TableRow::new(variant.id.as_str())
            .cell("sku", &variant.sku)
            .cell("size", label(variant.size.as_ref()))
            .cell("color", label(variant.color.as_ref()))
            .cell(
                "price",
                variant.price.map_or_else(
                    || "Product price".to_owned(),
                    |p| Price::new(p, CurrencyCode::default()).display(),
                ),
            )
            .cell("stock", variant.stock.to_string())
    }

    fn blank_form(&self) -> VariantForm {
        VariantForm {
            stock: "0".into(),
            ..VariantForm::default()
        }
    }

    async fn list(&self) -> Result<Vec<Variant>> {
        Ok(self.client.products().variants(&self.product_id).await?)
    }

    async fn create(&self, input: VariantInput) -> Result<Variant> {
        Ok(self
            .client
            .products()
            .create_variant(&self.product_id, &input)
            .await?)
    }

    async fn update(&self, id: &VariantId, input: VariantInput) -> Result<Variant> {
        Ok(self
            .client
            .products()
            .update_variant(&self.product_id, id, &input)
            .await?)
    }

    async fn delete(&self, target: &ConfirmedDelete<VariantId>) -> Result<()> {
        Ok(self
            .client
            .products()
            .delete_variant(&self.product_id, target.id())
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn variant() -> Variant {
        serde_json::from_value(json!({
            "_id": "v1", "sku": "CC-M-OL",
            "size": {"_id": "m", "name": "M"}, "color": "olive",
            "price": 130, "stock": 4
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_form_prefills_ids() {
        let form = VariantForm::from_record(&variant());
        assert_eq!(form.size, "m");
        assert_eq!(form.color, "olive");
        assert_eq!(form.price.parse::<Decimal>().unwrap(), Decimal::from(130));
        assert_eq!(form.stock, "4");
    }

    #[test]
    fn test_validate_reports_every_field() {
        let form = VariantForm {
            sku: " ".into(),
            price: "free".into(),
            stock: "-2".into(),
            ..VariantForm::default()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.get("stock").is_some());
    }

    #[test]
    fn test_blank_price_uses_product_price() {
        let form = VariantForm {
            sku: "TOTE".into(),
            stock: "10".into(),
            ..VariantForm::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.price, None);
        assert_eq!(input.size, None);
        assert_eq!(input.stock, 10);

        let form = VariantForm {
            price: "12.5".into(),
            ..VariantForm::from_record(&variant())
        };
        assert_eq!(form.validate().unwrap().price, Some(Decimal::new(125, 1)));
    }
}
