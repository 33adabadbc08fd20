//! Orders and checkout payloads.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::delivery::DeliveryOption;
use super::product::{Product, Variant};
use super::user::User;
use crate::types::{
    DeliveryOptionId, OrderId, OrderStatus, PaymentMethod, PaymentStatus, Ref, UserId,
};

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", alias = "id")]
    pub id: OrderId,
    #[serde(default)]
    pub order_number: Option<String>,
    #[serde(default)]
    pub user: Option<Ref<User>>,
    #[serde(default, alias = "orderItems")]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
    #[serde(default)]
    pub delivery_option: Option<Ref<DeliveryOption>>,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, alias = "orderStatus")]
    pub status: OrderStatus,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(default, with = "rust_decimal::serde::float", alias = "shippingCharge")]
    pub delivery_charge: Decimal,
    #[serde(default, with = "rust_decimal::serde::float", alias = "totalAmount")]
    pub total: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Order number when assigned, else the id.
    #[must_use]
    pub fn reference(&self) -> &str {
        self.order_number.as_deref().unwrap_or(self.id.as_str())
    }

    /// Total number of units ordered.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

/// A line on a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(alias = "productId")]
    pub product: Ref<Product>,
    #[serde(default, alias = "variantId")]
    pub variant: Option<Ref<Variant>>,
    /// Product name captured at order time.
    #[serde(default)]
    pub name: Option<String>,
    pub quantity: u32,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl OrderItem {
    /// Captured name, else the product label or id.
    #[must_use]
    pub fn title(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.product.label_or_id())
    }
}

/// Address snapshot stored on an order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[serde(alias = "name")]
    pub full_name: String,
    pub phone: String,
    #[serde(alias = "addressLine1", alias = "street")]
    pub line1: String,
    #[serde(default, alias = "addressLine2", skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    #[serde(alias = "pincode", alias = "zip")]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

impl ShippingAddress {
    /// Single-line rendering for summaries.
    #[must_use]
    pub fn one_line(&self) -> String {
        let mut parts = vec![self.line1.as_str()];
        if let Some(line2) = self.line2.as_deref().filter(|l| !l.is_empty()) {
            parts.push(line2);
        }
        parts.extend([self.city.as_str(), self.state.as_str(), self.postal_code.as_str()]);
        if !self.country.is_empty() {
            parts.push(self.country.as_str());
        }
        parts.join(", ")
    }
}

/// Checkout initiation payload; the backend creates a pending order from the
/// current cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_option: Option<DeliveryOptionId>,
    pub payment_method: PaymentMethod,
}

/// Payment capture details sent from the payment page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentConfirmation {
    /// Provider transaction reference.
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Admin status change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Admin order listing filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub user: Option<UserId>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl OrderFilter {
    /// Query-string pairs for the set filters.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(user) = &self.user {
            pairs.push(("user", user.to_string()));
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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_decodes_aliases() {
        let order: Order = serde_json::from_value(json!({
            "_id": "o1",
            "orderItems": [{"productId": "p1", "name": "Tee", "quantity": 2, "price": 10}],
            "shippingAddress": {
                "name": "Ada", "phone": "555", "street": "1 Loop", "city": "Austin",
                "state": "TX", "pincode": "73301"
            },
            "paymentMethod": "online",
            "orderStatus": "shipped",
            "totalAmount": 27.5,
            "createdAt": "2026-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(order.reference(), "o1");
        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.payment_method, PaymentMethod::Online);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.total, Decimal::new(275, 1));
        assert_eq!(order.item_count(), 2);
        assert_eq!(order.items.first().unwrap().title(), "Tee");
        assert_eq!(
            order.shipping_address.unwrap().one_line(),
            "1 Loop, Austin, TX, 73301"
        );
    }

    #[test]
    fn test_checkout_request_shape() {
        let request = CheckoutRequest {
            shipping_address: ShippingAddress {
                full_name: "Ada".into(),
                phone: "555".into(),
                line1: "1 Loop".into(),
                city: "Austin".into(),
                state: "TX".into(),
                postal_code: "73301".into(),
                country: "US".into(),
                ..ShippingAddress::default()
            },
            delivery_option: Some(DeliveryOptionId::new("std")),
            payment_method: PaymentMethod::Cod,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["shippingAddress"]["postalCode"], "73301");
        assert_eq!(value["deliveryOption"], "std");
        assert_eq!(value["paymentMethod"], "cod");
        assert!(value["shippingAddress"].get("line2").is_none());
    }

    #[test]
    fn test_filter_pairs() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            limit: Some(20),
            ..OrderFilter::default()
        };
        assert_eq!(
            filter.to_pairs(),
            vec![("status", "pending".to_owned()), ("limit", "20".to_owned())]
        );
    }
}
