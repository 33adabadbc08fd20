//! Cart page.
//!
//! Every action returns the refreshed [`CartView`] so the caller can redraw
//! the whole cart from one value.

use rust_decimal::Decimal;
use threadline_client::ApiClient;
use threadline_core::models::{AddToCart, Cart, CartItem, Product};
use threadline_core::{CartItemId, CurrencyCode, Price, Ref, VariantId};
use tracing::{info, instrument};

use crate::error::{Result, StorefrontError};

/// Message shown when the cart has no lines.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty";

/// One cart line prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: CartItemId,
    pub slug: Option<String>,
    pub title: String,
    pub variant_title: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: Option<String>,
}

/// The cart prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
    subtotal_amount: Decimal,
}

impl CartView {
    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from(&Cart::default())
    }

    /// Whether there is nothing to show but the empty state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The empty-state message when the cart has no lines.
    #[must_use]
    pub fn empty_state(&self) -> Option<&'static str> {
        self.is_empty().then_some(EMPTY_CART_MESSAGE)
    }

    /// Find a line by item id or by its 1-based position.
    ///
    /// # Errors
    ///
    /// Returns `UnknownCartItem` if nothing matches.
    pub fn line(&self, key: &str) -> Result<&CartLineView> {
        let key = key.trim();
        self.lines
            .iter()
            .find(|line| line.id.as_str() == key)
            .or_else(|| {
                key.parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| self.lines.get(i))
            })
            .ok_or_else(|| StorefrontError::UnknownCartItem(key.to_owned()))
    }

    /// Unformatted subtotal.
    #[must_use]
    pub const fn subtotal_amount(&self) -> Decimal {
        self.subtotal_amount
    }
}

fn format_price(amount: Decimal) -> String {
    Price::new(amount, CurrencyCode::default()).display()
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let subtotal = cart.subtotal();
        Self {
            lines: cart.items.iter().map(CartLineView::from).collect(),
            subtotal: format_price(subtotal),
            item_count: cart.item_count(),
            subtotal_amount: subtotal,
        }
    }
}

impl From<&CartItem> for CartLineView {
    fn from(item: &CartItem) -> Self {
        let product = item.product.populated();
        let variant_image = item
            .variant
            .as_ref()
            .and_then(Ref::populated)
            .and_then(|v| v.images.first().cloned());
        Self {
            id: item.id.clone(),
            slug: product.map(|p| p.slug.clone()).filter(|s| !s.is_empty()),
            title: item.title(),
            variant_title: item.variant_title(),
            quantity: item.quantity,
            price: format_price(item.price),
            line_price: format_price(item.line_total()),
            image: variant_image
                .or_else(|| product.and_then(Product::thumbnail).map(str::to_owned)),
        }
    }
}

/// Cart page actions.
#[derive(Debug, Clone)]
pub struct CartPage {
    client: ApiClient,
}

impl CartPage {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The current cart, raw.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn cart(&self) -> Result<Cart> {
        Ok(self.client.cart().get().await?)
    }

    /// The current cart for display.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn view(&self) -> Result<CartView> {
        Ok(CartView::from(&self.cart().await?))
    }

    /// Add `quantity` units of `product` (and `variant`) to the cart.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuantity` for zero, `VariantRequired` when the product
    /// has variants and none is given, `UnknownVariant`/`OutOfStock` for a
    /// bad variant, or the backend error.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add(
        &self,
        product: &Product,
        variant: Option<&VariantId>,
        quantity: u32,
    ) -> Result<CartView> {
        if quantity == 0 {
            return Err(StorefrontError::InvalidQuantity);
        }
        match variant {
            None if !product.variants.is_empty() => {
                return Err(StorefrontError::VariantRequired {
                    product: product.name.clone(),
                });
            }
            Some(id) => match product.variant(id) {
                None if !product.variants.is_empty() => {
                    return Err(StorefrontError::UnknownVariant(id.to_string()));
                }
                Some(v) if !v.in_stock() => {
                    return Err(StorefrontError::OutOfStock(format!(
                        "{} ({})",
                        product.name,
                        v.option_label()
                    )));
                }
                _ => {}
            },
            None => {}
        }

        let request = AddToCart {
            product_id: product.id.clone(),
            variant_id: variant.cloned(),
            quantity,
        };
        let cart = self.client.cart().add_item(&request).await?;
        info!(quantity, "Added to cart");
        Ok(CartView::from(&cart))
    }

    /// Change a line's quantity; zero removes the line.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn set_quantity(&self, item_id: &CartItemId, quantity: u32) -> Result<CartView> {
        if quantity == 0 {
            return self.remove(item_id).await;
        }
        let cart = self.client.cart().update_item(item_id, quantity).await?;
        Ok(CartView::from(&cart))
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(item_id = %item_id))]
    pub async fn remove(&self, item_id: &CartItemId) -> Result<CartView> {
        let cart = self.client.cart().remove_item(item_id).await?;
        Ok(CartView::from(&cart))
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<CartView> {
        self.client.cart().clear().await?;
        Ok(CartView::empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use threadline_client::ClientConfig;

    use super::*;

    fn cart() -> Cart {
        serde_json::from_value(json!({
            "_id": "cart1",
            "items": [
                {"_id": "i1", "product": {"_id": "p1", "name": "Oxford Shirt", "slug": "oxford",
                  "images": ["/img/oxford.jpg"]},
                 "variant": {"_id": "v1", "sku": "OX-M", "size": {"_id": "m", "name": "M"},
                  "stock": 2},
                 "quantity": 2, "price": 1250},
                {"_id": "i2", "product": "p2", "quantity": 1, "price": 15.5}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_view_formats_lines() {
        let view = CartView::from(&cart());
        assert_eq!(view.item_count, 3);
        assert_eq!(view.subtotal, "$2,515.50");
        assert!(view.empty_state().is_none());

        let first = view.lines.first().unwrap();
        assert_eq!(first.title, "Oxford Shirt");
        assert_eq!(first.variant_title.as_deref(), Some("M"));
        assert_eq!(first.line_price, "$2,500.00");
        assert_eq!(first.image.as_deref(), Some("/img/oxford.jpg"));
        assert_eq!(first.slug.as_deref(), Some("oxford"));

        let second = view.lines.get(1).unwrap();
        assert_eq!(second.title, "p2");
        assert_eq!(second.slug, None);
    }

    #[test]
    fn test_line_lookup_by_id_or_position() {
        let view = CartView::from(&cart());
        assert_eq!(view.line("i2").unwrap().title, "p2");
        assert_eq!(view.line("1").unwrap().id.as_str(), "i1");
        assert!(matches!(view.line("0"), Err(StorefrontError::UnknownCartItem(_))));
        assert!(view.line("9").is_err());
    }

    #[test]
    fn test_empty_view_shows_empty_state() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.empty_state(), Some(EMPTY_CART_MESSAGE));
        assert_eq!(view.subtotal, "$0.00");
    }

    fn page() -> CartPage {
        CartPage::new(ApiClient::new(&ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap())
    }

    fn product_with_variants() -> Product {
        serde_json::from_value(json!({
            "_id": "p1", "name": "Oxford Shirt", "price": 40,
            "variants": [{"_id": "v1", "sku": "OX-M", "stock": 0}]
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_add_rejects_zero_quantity() {
        let err = page().add(&product_with_variants(), None, 0).await.unwrap_err();
        assert!(matches!(err, StorefrontError::InvalidQuantity));
    }

    #[tokio::test]
    async fn test_add_requires_variant_choice() {
        let err = page().add(&product_with_variants(), None, 1).await.unwrap_err();
        assert!(matches!(err, StorefrontError::VariantRequired { .. }));

        let err = page()
            .add(&product_with_variants(), Some(&VariantId::new("nope")), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::UnknownVariant(_)));

        let err = page()
            .add(&product_with_variants(), Some(&VariantId::new("v1")), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::OutOfStock(_)));
    }
}
