//! Integration tests for the REST client's transport rules.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use serde_json::json;
use threadline_client::{ApiError, ImageUpload};
use threadline_core::models::{BrandInput, OrderFilter};
use threadline_core::{BrandId, ProductId};
use threadline_integration_tests::{TOKEN, TestContext, order_json, product_json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

// ============================================================================
// Bearer Token
// ============================================================================

#[tokio::test]
async fn test_no_authorization_header_without_token() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.server)
        .await;

    ctx.client.brands().list().await.unwrap();

    let requests = ctx.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_token_is_sent_until_cleared() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/brands"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&ctx.server)
        .await;
    ctx.client.brands().list().await.unwrap();

    ctx.client.clear_token().await;
    Mock::given(method("GET"))
        .and(path("/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&ctx.server)
        .await;
    ctx.client.categories().list().await.unwrap();

    let requests = ctx.server.received_requests().await.unwrap();
    let last = requests.last().unwrap();
    assert_eq!(last.url.path(), "/categories");
    assert!(last.headers.get("authorization").is_none());
}

// ============================================================================
// Response Shapes
// ============================================================================

#[tokio::test]
async fn test_bare_and_enveloped_bodies_decode_alike() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_json()))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/slug/chore-coat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": product_json()})),
        )
        .mount(&ctx.server)
        .await;

    let products = ctx.client.products();
    let bare = products.get(&ProductId::new("p1")).await.unwrap();
    let wrapped = products.get_by_slug("chore-coat").await.unwrap();
    assert_eq!(bare, wrapped);
    assert_eq!(bare.variants.len(), 2);
}

#[tokio::test]
async fn test_paged_listing_unwraps_items() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"items": [{"_id": "b1", "name": "Northbound"}], "total": 1, "page": 1, "pages": 1}
        })))
        .mount(&ctx.server)
        .await;

    let brands = ctx.client.brands().list().await.unwrap();
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0].id, BrandId::new("b1"));
    assert!(brands[0].is_active);
}

#[tokio::test]
async fn test_enveloped_page_keeps_counters() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("GET"))
        .and(path("/orders"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [order_json("pending", "online")],
            "total": 41, "page": 2, "pages": 3
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let filter = OrderFilter {
        page: Some(2),
        ..OrderFilter::default()
    };
    let page = ctx.client.orders().list(&filter).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.total, 41);
    assert_eq!((page.page, page.pages), (2, 3));
    assert!(page.has_next());
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_status_codes_map_to_errors() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"message": "Product not found"})),
        )
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "jwt expired"})))
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/cart"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .products()
        .get(&ProductId::new("missing"))
        .await
        .unwrap_err();
    assert!(matches!(&err, ApiError::NotFound(m) if m == "Product not found"));

    let err = ctx.client.users().me().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Unauthorized: jwt expired");

    let err = ctx.client.cart().get().await.unwrap_err();
    assert!(matches!(err, ApiError::Api { status: 503, ref message } if message == "upstream down"));
}

#[tokio::test]
async fn test_unexpected_shape_is_a_parse_error() {
    let ctx = TestContext::new().await;
    Mock::given(method("GET"))
        .and(path("/products/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "no id"})))
        .mount(&ctx.server)
        .await;

    let err = ctx
        .client
        .products()
        .get(&ProductId::new("p1"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_logo_is_sent_as_multipart() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("POST"))
        .and(path("/brands"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"_id": "b9", "name": "Northbound", "logo": "/img/b9.png"})),
        )
        .mount(&ctx.server)
        .await;

    let input = BrandInput {
        name: "Northbound".into(),
        slug: "northbound".into(),
        description: None,
        is_active: true,
    };
    let logo = ImageUpload::new("logo.png", vec![0x89, b'P', b'N', b'G']).unwrap();
    let brand = ctx.client.brands().create(&input, Some(logo)).await.unwrap();
    assert_eq!(brand.logo.as_deref(), Some("/img/b9.png"));

    let requests = ctx.server.received_requests().await.unwrap();
    let content_type = requests[0]
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data"));
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"name\""));
    assert!(body.contains("Northbound"));
    assert!(body.contains("name=\"isActive\""));
    assert!(body.contains("name=\"logo\"; filename=\"logo.png\""));
}

#[tokio::test]
async fn test_json_body_without_logo() {
    let ctx = TestContext::signed_in().await;
    Mock::given(method("PUT"))
        .and(path("/brands/b1"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"_id": "b1", "name": "North"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let input = BrandInput {
        name: "North".into(),
        slug: "north".into(),
        description: Some("Workwear".into()),
        is_active: false,
    };
    let brand = ctx
        .client
        .brands()
        .update(&BrandId::new("b1"), &input, None)
        .await
        .unwrap();
    assert_eq!(brand.name, "North");
}
