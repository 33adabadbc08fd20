//! Delivery options and postal-code serviceability.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{DeliveryOptionId, Entity};

/// A shipping speed offered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    #[serde(rename = "_id", alias = "id")]
    pub id: DeliveryOptionId,
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float", alias = "price")]
    pub charge: Decimal,
    #[serde(default)]
    pub estimated_days: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Entity for DeliveryOption {
    type Id = DeliveryOptionId;

    fn id(&self) -> &DeliveryOptionId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// Result of checking whether a postal code can be delivered to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryCheck {
    #[serde(default, alias = "pincode")]
    pub postal_code: String,
    #[serde(alias = "available", alias = "deliverable")]
    pub serviceable: bool,
    #[serde(default)]
    pub estimated_days: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub charge: Option<Decimal>,
    #[serde(default)]
    pub message: Option<String>,
}
