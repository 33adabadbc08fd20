//! Accounts and address book entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::order::ShippingAddress;
use crate::types::{AddressId, Entity, UserId, UserRole};

/// A storefront or admin account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the account can use the admin screens.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The address marked default, else the first one.
    #[must_use]
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses
            .iter()
            .find(|a| a.is_default)
            .or_else(|| self.addresses.first())
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

/// A saved address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "_id", alias = "id")]
    pub id: AddressId,
    #[serde(flatten)]
    pub address: ShippingAddress,
    #[serde(default)]
    pub is_default: bool,
}

/// Create/update payload for an address book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(flatten)]
    pub address: ShippingAddress,
    pub is_default: bool,
}

/// Response to login and registration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    pub user: User,
}

/// Fields a shopper may change on their own profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Admin edit of a customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: UserRole,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_address_flattens_snapshot() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "name": "Ada",
            "email": "ada@shop.io",
            "addresses": [
                {"_id": "a1", "fullName": "Ada", "phone": "1", "line1": "x", "city": "c",
                 "state": "s", "postalCode": "p"},
                {"_id": "a2", "fullName": "Ada", "phone": "1", "line1": "y", "city": "c",
                 "state": "s", "postalCode": "p", "isDefault": true}
            ]
        }))
        .unwrap();
        assert_eq!(user.id.as_str(), "7");
        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.default_address().map(|a| a.id.as_str()), Some("a2"));
        assert_eq!(
            user.default_address().map(|a| a.address.line1.as_str()),
            Some("y")
        );
    }

    #[test]
    fn test_default_address_falls_back_to_first() {
        let user: User = serde_json::from_value(json!({
            "_id": "u1", "name": "B", "email": "b@shop.io",
            "addresses": [{"_id": "a1", "fullName": "B", "phone": "1", "line1": "x",
                           "city": "c", "state": "s", "postalCode": "p"}]
        }))
        .unwrap();
        assert_eq!(user.default_address().map(|a| a.id.as_str()), Some("a1"));
    }

    #[test]
    fn test_auth_response_token_alias() {
        let auth: AuthResponse = serde_json::from_value(json!({
            "accessToken": "t0k",
            "user": {"_id": "u1", "name": "B", "email": "b@shop.io", "role": "admin"}
        }))
        .unwrap();
        assert_eq!(auth.token, "t0k");
        assert!(auth.user.is_admin());
    }
}
