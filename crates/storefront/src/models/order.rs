//! Order and order-line records.

use chrono::{DateTime, Utc};
use luxecuffs_core::{Email, Money, OrderId, OrderItemId, PaymentStatus, ProductId};
use serde::{Deserialize, Serialize};

use super::Product;

/// A customer order.
///
/// Created once per checkout submission. After creation the only mutation
/// is the `pending` to `paid` payment-status transition, which also records
/// the gateway's payment-intent id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: Email,
    pub customer_phone: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip_code: String,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
    pub payment_status: PaymentStatus,
    pub stripe_payment_intent_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Customer's full name for display.
    #[must_use]
    pub fn customer_name(&self) -> String {
        format!("{} {}", self.customer_first_name, self.customer_last_name)
    }
}

/// One line of an order.
///
/// `price` is the product's unit price captured when the order was placed;
/// later catalog price changes never affect it. Items are written in a batch
/// with their parent order and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Money,
}

impl OrderItem {
    /// Line total (captured unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// An order item joined with its product, for display and emails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetail {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product: Product,
}
