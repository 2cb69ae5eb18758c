//! Admin route handlers: login, product CRUD, order views.
//!
//! Login only checks credentials against the stored user; no token or
//! session is issued - the caller owns its session state.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
    Json,
    extract::{Path, State},
};
use luxecuffs_core::{OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{NewProduct, Order, OrderItemDetail, Product, ProductUpdate};
use crate::state::AppState;

/// Admin login request.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub username: String,
    pub password: String,
}

/// The subset of a user that login responses expose.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserView {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
}

/// Admin login response.
#[derive(Debug, Serialize)]
pub struct AdminLoginResponse {
    pub user: AdminUserView,
}

/// Check a username/password pair against the stored admin user.
///
/// # Errors
///
/// Returns 400 when either field is empty, 401 when the credentials do not
/// match an admin account. The response never distinguishes unknown user
/// from wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let user = state
        .store()
        .user_by_username(&body.username)
        .ok_or_else(invalid_credentials)?;

    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|_| invalid_credentials())?;
    let password_ok = Argon2::default()
        .verify_password(body.password.as_bytes(), &parsed_hash)
        .is_ok();

    if !password_ok || !user.is_admin {
        return Err(invalid_credentials());
    }

    Ok(Json(AdminLoginResponse {
        user: AdminUserView {
            id: user.id,
            username: user.username,
            is_admin: user.is_admin,
        },
    }))
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid credentials".to_string())
}

/// Create a catalog product.
pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<NewProduct>,
) -> Json<Product> {
    Json(state.store().create_product(body))
}

/// Partially update a catalog product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(body): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    state
        .store()
        .update_product(id, body)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Deletion confirmation message.
#[derive(Debug, Serialize)]
pub struct DeleteProductResponse {
    pub message: String,
}

/// Delete a catalog product.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<DeleteProductResponse>> {
    if state.store().delete_product(id) {
        Ok(Json(DeleteProductResponse {
            message: "Product deleted successfully".to_string(),
        }))
    } else {
        Err(AppError::NotFound(format!("product {id}")))
    }
}

/// All orders, newest first.
pub async fn list_orders(State(state): State<AppState>) -> Json<Vec<Order>> {
    Json(state.store().list_orders())
}

/// An order with its product-joined items.
#[derive(Debug, Serialize)]
pub struct OrderDetailResponse {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Single order with its items.
///
/// # Errors
///
/// Returns 404 if the order (or a product an item references) is absent.
pub async fn order_detail(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderDetailResponse>> {
    let (order, items) = state.store().order_with_items(id)?;
    Ok(Json(OrderDetailResponse { order, items }))
}
