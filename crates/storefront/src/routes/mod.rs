//! HTTP route handlers for the storefront and admin API.
//!
//! All request and response bodies are JSON with camelCase field names;
//! monetary values travel as decimal strings with two fraction digits.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//!
//! # Catalog
//! GET  /api/products                - List; ?search= or ?material=&minPrice=&maxPrice=
//! GET  /api/products/featured       - Featured subset
//! GET  /api/products/{id}           - Single product, 404 if absent
//!
//! # Admin
//! POST   /api/admin/login           - Credential check (no session issued)
//! POST   /api/admin/products        - Create product
//! PUT    /api/admin/products/{id}   - Partial update
//! DELETE /api/admin/products/{id}   - Delete
//! GET    /api/admin/orders          - All orders, newest first
//! GET    /api/admin/orders/{id}     - Order with product-joined items
//!
//! # Checkout & payment
//! POST /api/create-payment-intent   - {amount, orderId?} -> {clientSecret}
//! POST /api/orders                  - {orderData, items} -> {order, items}
//! POST /api/payment-success         - {orderId, paymentIntentId} -> {success}
//! ```

pub mod admin;
pub mod orders;
pub mod payments;
pub mod products;

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(products::list))
        .route("/api/products/featured", get(products::featured))
        .route("/api/products/{id}", get(products::show))
        .route("/api/admin/login", post(admin::login))
        .route("/api/admin/products", post(admin::create_product))
        .route(
            "/api/admin/products/{id}",
            put(admin::update_product).delete(admin::delete_product),
        )
        .route("/api/admin/orders", get(admin::list_orders))
        .route("/api/admin/orders/{id}", get(admin::order_detail))
        .route("/api/create-payment-intent", post(payments::create_payment_intent))
        .route("/api/orders", post(orders::create))
        .route("/api/payment-success", post(payments::payment_success))
}

/// Assemble the full application router.
///
/// The CORS layer is permissive because the UI is served from a separate
/// origin and the API issues no credentials of its own.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
