//! Checkout route handler.

use axum::{Json, extract::State};
use serde::Deserialize;

use crate::checkout::{self, CheckoutInfo, CheckoutReceipt, LineItemRequest};
use crate::error::Result;
use crate::state::AppState;

/// Checkout submission: customer/shipping data plus requested lines.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_data: CheckoutInfo,
    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

/// Run the checkout pipeline.
///
/// # Errors
///
/// Surfaces checkout validation (400), unknown product (404), and
/// insufficient stock (400) failures; on any of them no order exists.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<Json<CheckoutReceipt>> {
    let receipt = checkout::submit_checkout(state.store(), body.order_data, &body.items)?;

    tracing::info!(
        order_id = %receipt.order.id,
        total = %receipt.order.total,
        items = receipt.items.len(),
        "Order created"
    );

    Ok(Json(receipt))
}
