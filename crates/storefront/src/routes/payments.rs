//! Payment route handlers: intent creation and confirmation.

use axum::{Json, extract::State};
use luxecuffs_core::{Money, OrderId};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Payment intent request; amount is in currency units (e.g. "285.00").
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentRequest {
    #[serde(default)]
    pub amount: Money,
    #[serde(default)]
    pub order_id: Option<OrderId>,
}

/// Payment intent response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentIntentResponse {
    pub client_secret: String,
}

/// Ask the gateway to reserve a charge for the given amount.
///
/// Independent of order creation; the client may call this before or after
/// submitting the order.
///
/// # Errors
///
/// Returns 400 for a non-positive amount (checked before any gateway
/// call) and 502 when the gateway rejects the request.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(body): Json<CreatePaymentIntentRequest>,
) -> Result<Json<CreatePaymentIntentResponse>> {
    if !body.amount.is_positive() {
        return Err(AppError::BadRequest("Invalid amount".to_string()));
    }
    let amount_cents = body
        .amount
        .as_cents()
        .ok_or_else(|| AppError::BadRequest("Invalid amount".to_string()))?;

    let intent = state
        .stripe()
        .create_payment_intent(amount_cents, body.order_id)
        .await?;
    let client_secret = intent.into_client_secret()?;

    Ok(Json(CreatePaymentIntentResponse { client_secret }))
}

/// Payment confirmation reported by the client after the gateway charge
/// succeeds.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSuccessRequest {
    pub order_id: OrderId,
    pub payment_intent_id: String,
}

/// Confirmation response.
#[derive(Debug, Serialize)]
pub struct PaymentSuccessResponse {
    pub success: bool,
}

/// Mark the order paid and dispatch both order emails.
///
/// Not idempotent: confirming the same order twice re-applies the same
/// status and re-sends both emails. Email failures are logged and never
/// fail this request - the status change has already been committed.
///
/// # Errors
///
/// Returns 404 if the order does not exist.
pub async fn payment_success(
    State(state): State<AppState>,
    Json(body): Json<PaymentSuccessRequest>,
) -> Result<Json<PaymentSuccessResponse>> {
    let order = state
        .store()
        .mark_order_paid(body.order_id, &body.payment_intent_id)
        .ok_or_else(|| AppError::NotFound(format!("order {}", body.order_id)))?;

    tracing::info!(
        order_id = %order.id,
        payment_intent_id = %body.payment_intent_id,
        "Order marked paid"
    );

    let (order, items) = state.store().order_with_items(order.id)?;

    if let Some(mailer) = state.mailer() {
        if let Err(err) = mailer.send_order_notification(&order, &items).await {
            tracing::error!(error = %err, order_id = %order.id, "Failed to send order notification email");
        }
        if let Err(err) = mailer.send_order_confirmation(&order, &items).await {
            tracing::error!(error = %err, order_id = %order.id, "Failed to send order confirmation email");
        }
    } else {
        tracing::warn!(order_id = %order.id, "SMTP not configured, skipping order emails");
    }

    Ok(Json(PaymentSuccessResponse { success: true }))
}
