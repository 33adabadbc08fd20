//! REST endpoint paths, relative to the configured base URL.
//!
//! Identifiers and slugs are percent-encoded as single path segments.

use threadline_core::models::AttributeKind;
use threadline_core::{
    AddressId, AttributeId, BrandId, CartItemId, CategoryId, OrderId, ProductId, UserId,
    VariantId,
};

pub const PRODUCTS: &str = "/products";
pub const PRODUCTS_FEATURED: &str = "/products/featured";
pub const CATEGORIES: &str = "/categories";
pub const BRANDS: &str = "/brands";
pub const CART: &str = "/cart";
pub const CART_ITEMS: &str = "/cart/items";
pub const ORDERS: &str = "/orders";
pub const MY_ORDERS: &str = "/orders/my";
pub const CHECKOUT: &str = "/orders/checkout";
pub const LOGIN: &str = "/users/login";
pub const REGISTER: &str = "/users/register";
pub const ME: &str = "/users/me";
pub const MY_ADDRESSES: &str = "/users/me/addresses";
pub const USERS: &str = "/users";
pub const DELIVERY_OPTIONS: &str = "/delivery/options";

/// Percent-encode one path segment.
#[must_use]
pub fn segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[must_use]
pub fn product(id: &ProductId) -> String {
    format!("{PRODUCTS}/{}", segment(id.as_str()))
}

#[must_use]
pub fn product_by_slug(slug: &str) -> String {
    format!("{PRODUCTS}/slug/{}", segment(slug))
}

#[must_use]
pub fn variants(product_id: &ProductId) -> String {
    format!("{}/variants", product(product_id))
}

#[must_use]
pub fn variant(product_id: &ProductId, variant_id: &VariantId) -> String {
    format!("{}/{}", variants(product_id), segment(variant_id.as_str()))
}

#[must_use]
pub fn category(id: &CategoryId) -> String {
    format!("{CATEGORIES}/{}", segment(id.as_str()))
}

#[must_use]
pub fn brand(id: &BrandId) -> String {
    format!("{BRANDS}/{}", segment(id.as_str()))
}

/// Collection path of an attribute taxonomy, e.g. `/attributes/collar-types`.
#[must_use]
pub fn attributes(kind: AttributeKind) -> String {
    format!("/attributes/{}", kind.slug())
}

#[must_use]
pub fn attribute(kind: AttributeKind, id: &AttributeId) -> String {
    format!("{}/{}", attributes(kind), segment(id.as_str()))
}

#[must_use]
pub fn cart_item(id: &CartItemId) -> String {
    format!("{CART_ITEMS}/{}", segment(id.as_str()))
}

#[must_use]
pub fn order(id: &OrderId) -> String {
    format!("{ORDERS}/{}", segment(id.as_str()))
}

#[must_use]
pub fn order_status(id: &OrderId) -> String {
    format!("{}/status", order(id))
}

#[must_use]
pub fn order_cancel(id: &OrderId) -> String {
    format!("{}/cancel", order(id))
}

#[must_use]
pub fn order_payment(id: &OrderId) -> String {
    format!("{}/payment", order(id))
}

#[must_use]
pub fn my_address(id: &AddressId) -> String {
    format!("{MY_ADDRESSES}/{}", segment(id.as_str()))
}

#[must_use]
pub fn user(id: &UserId) -> String {
    format!("{USERS}/{}", segment(id.as_str()))
}

#[must_use]
pub fn delivery_check(postal_code: &str) -> String {
    format!("/delivery/check/{}", segment(postal_code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths() {
        assert_eq!(
            variant(&ProductId::new("p1"), &VariantId::new("v2")),
            "/products/p1/variants/v2"
        );
        assert_eq!(order_payment(&OrderId::new("o9")), "/orders/o9/payment");
        assert_eq!(
            attribute(AttributeKind::ShoeHeight, &AttributeId::new("a1")),
            "/attributes/shoe-heights/a1"
        );
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(product_by_slug("linen shirt/v2"), "/products/slug/linen%20shirt%2Fv2");
        assert_eq!(delivery_check(" 560 001 "), "/delivery/check/560%20001");
    }
}
