//! Shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::product::{Product, Variant};
use crate::types::{CartId, CartItemId, ProductId, Ref, VariantId};

/// The signed-in shopper's cart.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    #[serde(default, rename = "_id", alias = "id")]
    pub id: Option<CartId>,
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Subtotal as computed by the backend, when it sends one.
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        alias = "totalPrice",
        alias = "totalAmount"
    )]
    pub subtotal: Option<Decimal>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Backend subtotal, or the sum of line totals when it did not send one.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.subtotal
            .unwrap_or_else(|| self.items.iter().map(CartItem::line_total).sum())
    }

    /// Look up a line by id.
    #[must_use]
    pub fn item(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }
}

/// One line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    #[serde(rename = "_id", alias = "id")]
    pub id: CartItemId,
    #[serde(alias = "productId")]
    pub product: Ref<Product>,
    #[serde(default, alias = "variantId")]
    pub variant: Option<Ref<Variant>>,
    pub quantity: u32,
    /// Unit price at the time the line was added.
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Product name when populated, else the product id.
    #[must_use]
    pub fn title(&self) -> String {
        self.product.label_or_id()
    }

    /// Variant option label ("M / Navy") when the variant was populated.
    #[must_use]
    pub fn variant_title(&self) -> Option<String> {
        self.variant
            .as_ref()
            .and_then(Ref::populated)
            .map(Variant::option_label)
    }
}

/// Payload for adding a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub product_id: ProductId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    pub quantity: u32,
}

/// Payload for changing a line's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpdateCartItem {
    pub quantity: u32,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn cart(subtotal: Option<f64>) -> Cart {
        let mut value = json!({
            "_id": "cart1",
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "Tee"}, "quantity": 2, "price": 10.5},
                {"_id": "i2", "productId": "p2",
                 "variant": {"_id": "v9", "sku": "BOOT-42", "size": {"_id": "s42", "name": "42"}},
                 "quantity": 1, "price": 80}
            ]
        });
        if let Some(total) = subtotal {
            value["subtotal"] = json!(total);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_computes_subtotal_when_missing() {
        let cart = cart(None);
        assert_eq!(cart.subtotal(), Decimal::from(101));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_prefers_backend_subtotal() {
        assert_eq!(cart(Some(95.0)).subtotal(), Decimal::from(95));
    }

    #[test]
    fn test_titles() {
        let cart = cart(None);
        let first = cart.item(&CartItemId::new("i1")).unwrap();
        assert_eq!(first.title(), "Tee");
        assert_eq!(first.variant_title(), None);
        let second = cart.item(&CartItemId::new("i2")).unwrap();
        assert_eq!(second.title(), "p2");
        assert_eq!(second.variant_title().as_deref(), Some("42"));
    }

    #[test]
    fn test_empty_cart_defaults() {
        let cart: Cart = serde_json::from_str("{}").unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }
}
