//! API tests driving the full router in-process.
//!
//! These tests run hermetically: SMTP is unconfigured (email dispatch is
//! skipped with a log line) and no exercised path reaches the Stripe API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use luxecuffs_storefront::config::{AdminSeedConfig, StorefrontConfig, StripeConfig};
use luxecuffs_storefront::routes;
use luxecuffs_storefront::state::AppState;
use luxecuffs_storefront::store::Store;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_PASSWORD: &str = "kD93mvB1xQ7pLw2Z";

fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().expect("valid host"),
        port: 0,
        stripe: StripeConfig {
            secret_key: SecretString::from("sk_test_4eC39HqLyjWDarjtT1zdp7dc"),
        },
        email: None,
        admin: AdminSeedConfig {
            username: ADMIN_USERNAME.to_string(),
            password: SecretString::from(ADMIN_PASSWORD),
            email: None,
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

/// Build an app with the admin account and demo catalog seeded.
fn test_app() -> Router {
    let config = test_config();
    let store = Store::new();
    store.seed_admin(&config.admin).expect("seed admin");
    store.seed_sample_catalog();
    let state = AppState::new(config, store).expect("build state");
    routes::app(state)
}

/// Build an app with the admin account but an empty catalog.
fn empty_catalog_app() -> Router {
    let config = test_config();
    let store = Store::new();
    store.seed_admin(&config.admin).expect("seed admin");
    let state = AppState::new(config, store).expect("build state");
    routes::app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request")
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request")
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request succeeds");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

/// Create a product through the admin API and return its id.
async fn create_product(app: &Router, name: &str, price: &str, stock: u32) -> String {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/admin/products",
            &json!({
                "name": name,
                "description": format!("{name} description"),
                "price": price,
                "imageUrl": "https://img.example/p.jpg",
                "material": "Gold",
                "stock": stock,
                "featured": false,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().expect("product id").to_string()
}

fn checkout_body(items: Value) -> Value {
    json!({
        "orderData": {
            "customerFirstName": "Ada",
            "customerLastName": "Lovelace",
            "customerEmail": "ada@example.com",
            "customerPhone": "555-0100",
            "shippingStreet": "1 Analytical Way",
            "shippingCity": "London",
            "shippingState": "LDN",
            "shippingZipCode": "12345",
        },
        "items": items,
    })
}

#[tokio::test]
async fn health_returns_ok() {
    let app = test_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("ok".to_string()));
}

#[tokio::test]
async fn list_products_returns_seeded_catalog() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/products")).await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().expect("array");
    assert_eq!(products.len(), 6);

    // Money fields travel as strings with exactly two fraction digits
    for product in products {
        let price = product["price"].as_str().expect("price is a string");
        let (_, fraction) = price.split_once('.').expect("has fraction digits");
        assert_eq!(fraction.len(), 2, "price {price} should have 2 decimals");
    }
}

#[tokio::test]
async fn search_products_matches_case_insensitively() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/products?search=GOLD")).await;
    assert_eq!(status, StatusCode::OK);

    // Matches name, description, or material
    let names: Vec<&str> = body
        .as_array()
        .expect("array")
        .iter()
        .map(|p| p["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"Classic Gold Heritage"));
    assert!(names.contains(&"Diamond Prestige"));
    assert!(names.contains(&"Pearl Elegance"));
}

#[tokio::test]
async fn filter_products_is_conjunctive() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/products?material=Gold&minPrice=300")).await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().expect("array");
    assert_eq!(products.len(), 1);
    assert_eq!(products[0]["name"], "Pearl Elegance");
}

#[tokio::test]
async fn featured_products_subset() {
    let app = test_app();
    let (status, body) = send(&app, get("/api/products/featured")).await;
    assert_eq!(status, StatusCode::OK);

    let products = body.as_array().expect("array");
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|p| p["featured"] == true));
}

#[tokio::test]
async fn get_product_by_id() {
    let app = test_app();
    let (_, listing) = send(&app, get("/api/products")).await;
    let id = listing[0]["id"].as_str().expect("id");

    let (status, body) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], listing[0]["id"]);
}

#[tokio::test]
async fn get_unknown_product_is_404() {
    let app = test_app();
    let (status, body) = send(
        &app,
        get("/api/products/00000000-0000-4000-8000-000000000000"),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].as_str().expect("message").contains("Not found"));
}

#[tokio::test]
async fn admin_login_succeeds_with_seeded_credentials() {
    let app = test_app();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            &json!({"username": ADMIN_USERNAME, "password": ADMIN_PASSWORD}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], ADMIN_USERNAME);
    assert_eq!(body["user"]["isAdmin"], true);
    // The hash must never appear in a response
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn admin_login_rejects_bad_credentials() {
    let app = test_app();

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            &json!({"username": ADMIN_USERNAME, "password": "wrong-password-1"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/login",
            &json!({"username": "nobody", "password": ADMIN_PASSWORD}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        json_request("POST", "/api/admin/login", &json!({"username": "", "password": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn admin_product_crud_round_trip() {
    let app = empty_catalog_app();
    let id = create_product(&app, "Onyx Statement", "123.45", 4).await;

    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/admin/products/{id}"),
            &json!({"stock": 9}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 9);
    assert_eq!(body["price"], "123.45");
    assert_eq!(body["name"], "Onyx Statement");

    let (status, body) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/admin/products/{id}"))
            .body(Body::empty())
            .expect("build request"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Product deleted successfully");

    let (status, _) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/admin/products/{id}"),
            &json!({"stock": 1}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn checkout_prices_order_and_reserves_stock() {
    let app = empty_catalog_app();
    let hundred = create_product(&app, "Classic Gold Heritage", "100.00", 10).await;
    let fifty = create_product(&app, "Modern Silver Edge", "50.00", 10).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/orders",
            &checkout_body(json!([
                {"productId": hundred, "quantity": 2},
                {"productId": fifty, "quantity": 1},
            ])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let order = &body["order"];
    assert_eq!(order["subtotal"], "250.00");
    assert_eq!(order["shipping"], "15.00");
    assert_eq!(order["tax"], "20.00");
    assert_eq!(order["total"], "285.00");
    assert_eq!(order["paymentStatus"], "pending");
    assert_eq!(order["stripePaymentIntentId"], Value::Null);

    let items = body["items"].as_array().expect("items");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["product"].is_object()));

    let (_, product) = send(&app, get(&format!("/api/products/{hundred}"))).await;
    assert_eq!(product["stock"], 8);
}

#[tokio::test]
async fn checkout_validation_lists_offending_fields() {
    let app = test_app();

    let mut body = checkout_body(json!([]));
    body["orderData"]["customerFirstName"] = json!("");
    body["orderData"]["customerEmail"] = json!("not-an-email");

    let (status, response) = send(&app, json_request("POST", "/api/orders", &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let message = response["message"].as_str().expect("message");
    assert!(message.contains("customerFirstName"));
    assert!(message.contains("customerEmail"));

    // Hard stop: no partial order was created
    let (_, orders) = send(&app, get("/api/admin/orders")).await;
    assert_eq!(orders.as_array().expect("array").len(), 0);
}

#[tokio::test]
async fn checkout_insufficient_stock_persists_no_order() {
    let app = empty_catalog_app();
    let id = create_product(&app, "Diamond Prestige", "899.00", 2).await;

    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/orders",
            &checkout_body(json!([{"productId": id, "quantity": 3}])),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["message"]
            .as_str()
            .expect("message")
            .contains("Diamond Prestige")
    );

    let (_, orders) = send(&app, get("/api/admin/orders")).await;
    assert_eq!(orders.as_array().expect("array").len(), 0);

    let (_, product) = send(&app, get(&format!("/api/products/{id}"))).await;
    assert_eq!(product["stock"], 2);
}

#[tokio::test]
async fn checkout_unknown_product_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/orders",
            &checkout_body(
                json!([{"productId": "00000000-0000-4000-8000-000000000000", "quantity": 1}]),
            ),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn payment_success_marks_order_paid_and_repeats() {
    let app = empty_catalog_app();
    let id = create_product(&app, "Titanium Minimalist", "249.00", 5).await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/orders",
            &checkout_body(json!([{"productId": id, "quantity": 1}])),
        ),
    )
    .await;
    let order_id = body["order"]["id"].as_str().expect("order id").to_string();

    let confirm = json!({"orderId": order_id, "paymentIntentId": "pi_test_123"});
    let (status, body) = send(&app, json_request("POST", "/api/payment-success", &confirm)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, detail) = send(&app, get(&format!("/api/admin/orders/{order_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["order"]["paymentStatus"], "paid");
    assert_eq!(detail["order"]["stripePaymentIntentId"], "pi_test_123");

    // Confirmation is not idempotent: a repeat call also succeeds
    let (status, body) = send(&app, json_request("POST", "/api/payment-success", &confirm)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn payment_success_unknown_order_is_404() {
    let app = test_app();
    let (status, _) = send(
        &app,
        json_request(
            "POST",
            "/api/payment-success",
            &json!({
                "orderId": "00000000-0000-4000-8000-000000000000",
                "paymentIntentId": "pi_test_123",
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_payment_intent_rejects_non_positive_amounts() {
    let app = test_app();

    for amount in [json!("0"), json!("-5.00"), Value::Null] {
        let mut body = json!({});
        if amount != Value::Null {
            body["amount"] = amount;
        }
        let (status, response) =
            send(&app, json_request("POST", "/api/create-payment-intent", &body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            response["message"]
                .as_str()
                .expect("message")
                .contains("Invalid amount")
        );
    }
}

#[tokio::test]
async fn order_item_price_survives_catalog_price_change() {
    let app = empty_catalog_app();
    let id = create_product(&app, "Classic Gold Heritage", "100.00", 10).await;

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/orders",
            &checkout_body(json!([{"productId": id, "quantity": 1}])),
        ),
    )
    .await;
    let order_id = body["order"]["id"].as_str().expect("order id").to_string();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/admin/products/{id}"),
            &json!({"price": "999.00"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, detail) = send(&app, get(&format!("/api/admin/orders/{order_id}"))).await;
    let item = &detail["items"][0];
    assert_eq!(item["price"], "100.00");
    // The joined product shows the new catalog price
    assert_eq!(item["product"]["price"], "999.00");
}

#[tokio::test]
async fn admin_orders_list_is_newest_first() {
    let app = empty_catalog_app();
    let id = create_product(&app, "Vintage Brass Collection", "149.00", 20).await;

    let mut order_ids = Vec::new();
    for _ in 0..2 {
        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/orders",
                &checkout_body(json!([{"productId": id, "quantity": 1}])),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        order_ids.push(body["order"]["id"].as_str().expect("order id").to_string());
    }

    let (status, orders) = send(&app, get("/api/admin/orders")).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = orders
        .as_array()
        .expect("array")
        .iter()
        .map(|o| o["id"].as_str().expect("id"))
        .collect();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0], order_ids[1], "newest order listed first");
    assert_eq!(listed[1], order_ids[0]);
}
