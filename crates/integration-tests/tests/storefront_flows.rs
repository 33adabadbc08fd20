//! Integration tests for shopper flows: sign-in, cart and checkout.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::json;
use threadline_core::{CartItemId, DeliveryOptionId, OrderStatus, PaymentMethod, PaymentStatus};
use threadline_integration_tests::{
    TOKEN, TestContext, cart_json, order_json, product_json, user_json,
};
use threadline_storefront::StorefrontError;
use threadline_storefront::auth::{AuthSession, LoginForm};
use threadline_storefront::cart::CartPage;
use threadline_storefront::catalog::{Availability, Catalog};
use threadline_storefront::checkout::{Checkout, CheckoutStep, PaymentPage};
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, ResponseTemplate};

async fn mount_checkout_backend(ctx: &TestContext, payment_method: &str) {
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(2)))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/delivery/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_id": "standard", "name": "Standard", "charge": 5, "estimatedDays": 4},
            {"_id": "express", "name": "Express", "charge": 15, "estimatedDays": 1}
        ])))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/delivery/check/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"postalCode": "SW1Y 4JH", "serviceable": true})),
        )
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/orders/checkout"))
        .and(body_partial_json(json!({
            "deliveryOption": "standard",
            "paymentMethod": payment_method,
            "shippingAddress": {"postalCode": "SW1Y 4JH"}
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(order_json("pending", payment_method)),
        )
        .expect(1)
        .mount(&ctx.server)
        .await;
}

async fn review(ctx: &TestContext, method: PaymentMethod) -> Checkout {
    let mut checkout = Checkout::start(ctx.client.clone(), ctx.store.clone())
        .await
        .unwrap();
    let form = checkout.address_form().unwrap();
    assert_eq!(form.full_name, "Ada Lovelace");
    checkout.set_address(&form).unwrap();
    checkout
        .choose_delivery(&DeliveryOptionId::new("standard"))
        .await
        .unwrap();
    checkout.choose_payment(method).unwrap();
    checkout
}

// ============================================================================
// Sign-in
// ============================================================================

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let ctx = TestContext::new().await;
    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_partial_json(json!({"email": "ada@example.com"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"token": TOKEN, "user": user_json()})),
        )
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let auth = AuthSession::new(ctx.client.clone(), ctx.store.clone());
    let form = LoginForm {
        email: " Ada@Example.com ".into(),
        password: SecretString::from("correct horse"),
    };
    let user = auth.login(&form).await.unwrap();

    assert_eq!(user.name, "Ada Lovelace");
    assert!(auth.is_signed_in().unwrap());
    assert_eq!(ctx.store.user().unwrap().unwrap().email, "ada@example.com");

    let view = CartPage::new(ctx.client.clone()).view().await.unwrap();
    assert!(view.empty_state().is_some());
}

#[tokio::test]
async fn test_rejected_token_signs_out() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "jwt expired"})))
        .mount(&ctx.server)
        .await;

    let auth = AuthSession::new(ctx.client.clone(), ctx.store.clone());
    assert!(auth.restore().await.unwrap().is_none());
    assert!(ctx.store.token().unwrap().is_none());
    assert!(ctx.store.user().unwrap().is_none());
    assert!(!ctx.client.has_token().await);
}

// ============================================================================
// Product Page & Cart
// ============================================================================

#[tokio::test]
async fn test_variant_selection_and_add_to_cart() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/products/slug/chore-coat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .and(body_partial_json(json!({"productId": "p1", "variantId": "v1", "quantity": 1})))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(1)))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut page = Catalog::new(ctx.client.clone())
        .product("chore-coat")
        .await
        .unwrap();
    assert_eq!(page.availability(), Availability::ChooseOptions);
    assert_eq!(
        page.select_variant(Some("l".into()), Some("navy".into())),
        Availability::OutOfStock
    );
    assert_eq!(
        page.select_variant(Some("m".into()), Some("navy".into())),
        Availability::InStock(4)
    );

    let cart = CartPage::new(ctx.client.clone());
    let err = cart.add(&page.product, None, 1).await.unwrap_err();
    assert!(matches!(err, StorefrontError::VariantRequired { .. }));

    let variant = page.selected().map(|v| v.id.clone());
    let view = cart.add(&page.product, variant.as_ref(), 1).await.unwrap();
    assert_eq!(view.item_count, 1);
    assert_eq!(view.line("1").unwrap().title, "Chore Coat");
}

#[tokio::test]
async fn test_zero_quantity_removes_line() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("DELETE"))
        .and(path("/cart/items/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/cart/items/i1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(0)))
        .expect(0)
        .mount(&ctx.server)
        .await;

    let view = CartPage::new(ctx.client.clone())
        .set_quantity(&CartItemId::new("i1"), 0)
        .await
        .unwrap();
    assert!(view.is_empty());
    assert_eq!(view.subtotal_amount(), Decimal::ZERO);
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_online_checkout_keeps_data_until_paid() {
    let ctx = TestContext::signed_in().await;
    mount_checkout_backend(&ctx, "online").await;
    Mock::given(method("POST"))
        .and(path("/orders/o1/payment"))
        .and(body_partial_json(json!({"reference": "TXN-4411"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "_id": "o1", "orderNumber": "TL-1001", "status": "confirmed",
            "paymentMethod": "online", "paymentStatus": "paid", "total": 245
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let mut checkout = review(&ctx, PaymentMethod::Online).await;
    let summary = checkout.summary();
    assert_eq!(summary.subtotal, Decimal::from(240));
    assert_eq!(summary.delivery_charge, Decimal::from(5));

    let order = checkout.place_order().await.unwrap();
    assert_eq!(order.reference(), "TL-1001");
    assert_eq!(checkout.step(), CheckoutStep::Payment);
    assert!(checkout.go_to(CheckoutStep::Review).is_err());

    let data = ctx.store.checkout_data().unwrap().unwrap();
    assert_eq!(data.total, Decimal::from(245));
    assert_eq!(data.payment_method, PaymentMethod::Online);

    let page = PaymentPage::load(ctx.client.clone(), ctx.store.clone()).unwrap();
    assert_eq!(page.data().order_number.as_deref(), Some("TL-1001"));
    let paid = page.confirm("TXN-4411", Some("stripe")).await.unwrap();
    assert_eq!(paid.payment_status, PaymentStatus::Paid);
    assert_eq!(paid.status, OrderStatus::Confirmed);
    assert!(ctx.store.checkout_data().unwrap().is_none());
}

#[tokio::test]
async fn test_cash_on_delivery_completes_at_once() {
    let ctx = TestContext::signed_in().await;
    mount_checkout_backend(&ctx, "cod").await;

    let mut checkout = review(&ctx, PaymentMethod::Cod).await;
    checkout.place_order().await.unwrap();

    assert_eq!(checkout.step(), CheckoutStep::Complete);
    assert!(ctx.store.checkout_data().unwrap().is_none());
    assert!(matches!(
        PaymentPage::load(ctx.client.clone(), ctx.store.clone()),
        Err(StorefrontError::MissingCheckoutData)
    ));
}

#[tokio::test]
async fn test_checkout_refuses_empty_cart() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&ctx.server)
        .await;

    let err = Checkout::start(ctx.client.clone(), ctx.store.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, StorefrontError::EmptyCart));
}

#[tokio::test]
async fn test_checkout_needs_sign_in() {
    let ctx = TestContext::new().await;

    let err = Checkout::start(ctx.client.clone(), ctx.store.clone())
        .await
        .unwrap_err();
    assert!(err.needs_sign_in());
    assert!(ctx.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unserviceable_postal_code_stays_on_delivery() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_json(1)))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/delivery/options"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"_id": "standard", "name": "Standard", "charge": 5}])),
        )
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/delivery/check/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "postalCode": "SW1Y 4JH", "serviceable": false, "message": "Outside our area"
        })))
        .mount(&ctx.server)
        .await;

    let mut checkout = Checkout::start(ctx.client.clone(), ctx.store.clone())
        .await
        .unwrap();
    let form = checkout.address_form().unwrap();
    checkout.set_address(&form).unwrap();
    let err = checkout
        .choose_delivery(&DeliveryOptionId::new("standard"))
        .await
        .unwrap_err();

    assert!(matches!(err, StorefrontError::NotServiceable { .. }));
    assert_eq!(checkout.step(), CheckoutStep::Delivery);
}
