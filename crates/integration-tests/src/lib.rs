//! Integration tests for Threadline.
//!
//! Every test runs the real client, storefront and admin crates against a
//! [`wiremock`] server standing in for the REST backend, with session state
//! kept in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p threadline-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `client_transport` - Token handling, response envelopes, errors, uploads
//! - `storefront_flows` - Sign-in, cart and checkout
//! - `admin_screens` - CRUD screens and order management

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use serde_json::{Value, json};
use tempfile::TempDir;
use threadline_client::{ApiClient, ClientConfig};
use threadline_storefront::storage::SessionStore;
use wiremock::MockServer;

/// Token the fixtures sign in with.
pub const TOKEN: &str = "test-token";

/// A mocked backend, a client pointed at it and on-disk session storage.
pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
    pub store: SessionStore,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let client = ApiClient::new(&ClientConfig::new(&server.uri()).unwrap()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::in_dir(dir.path());
        Self {
            server,
            client,
            store,
            _dir: dir,
        }
    }

    /// A context with a stored shopper and the token installed.
    pub async fn signed_in() -> Self {
        let ctx = Self::new().await;
        ctx.store.set_token(TOKEN).unwrap();
        ctx.store
            .set_user(&serde_json::from_value(user_json()).unwrap())
            .unwrap();
        ctx.client
            .set_token(secrecy::SecretString::from(TOKEN))
            .await;
        ctx
    }
}

/// Shopper with one default address.
#[must_use]
pub fn user_json() -> Value {
    json!({
        "_id": "u1",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "role": "customer",
        "addresses": [{
            "_id": "a1",
            "fullName": "Ada Lovelace",
            "phone": "+44 20 7946 0000",
            "line1": "12 St James's Square",
            "city": "London",
            "state": "London",
            "postalCode": "SW1Y 4JH",
            "country": "GB",
            "isDefault": true
        }]
    })
}

/// A product with two sizes of one color.
#[must_use]
pub fn product_json() -> Value {
    json!({
        "_id": "p1",
        "name": "Chore Coat",
        "slug": "chore-coat",
        "brand": {"_id": "b1", "name": "Northbound"},
        "category": "c1",
        "price": 120,
        "variants": [
            {"_id": "v1", "sku": "CC-M-NAVY", "size": {"_id": "m", "name": "M"},
             "color": {"_id": "navy", "name": "Navy", "value": "#1f2a44"}, "stock": 4},
            {"_id": "v2", "sku": "CC-L-NAVY", "size": {"_id": "l", "name": "L"},
             "color": {"_id": "navy", "name": "Navy", "value": "#1f2a44"}, "stock": 0}
        ],
        "isActive": true
    })
}

/// A cart holding `quantity` of the medium coat.
#[must_use]
pub fn cart_json(quantity: u32) -> Value {
    json!({
        "_id": "cart1",
        "items": [{
            "_id": "i1",
            "product": {"_id": "p1", "name": "Chore Coat", "slug": "chore-coat", "price": 120},
            "variant": {"_id": "v1", "sku": "CC-M-NAVY", "size": {"_id": "m", "name": "M"}},
            "quantity": quantity,
            "price": 120
        }]
    })
}

/// A placed order for two coats with standard delivery.
#[must_use]
pub fn order_json(status: &str, payment_method: &str) -> Value {
    json!({
        "_id": "o1",
        "orderNumber": "TL-1001",
        "items": [{"product": "p1", "name": "Chore Coat", "quantity": 2, "price": 120}],
        "paymentMethod": payment_method,
        "paymentStatus": "pending",
        "status": status,
        "subtotal": 240,
        "deliveryCharge": 5,
        "total": 245
    })
}
