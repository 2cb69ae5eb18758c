//! Checkout pipeline.
//!
//! Converts a submitted cart into a persisted order: validate the customer
//! and shipping input, resolve each requested line against the catalog,
//! price the order, then persist the order and its items in one store
//! write. Payment happens afterwards against the gateway; the order stays
//! `pending` until [`crate::routes::payments`] confirms it.

use chrono::Utc;
use luxecuffs_core::{Email, OrderId, PaymentStatus, ProductId};
use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderItemDetail};
use crate::store::{OrderLineDraft, Store, StoreError};

pub mod pricing;

/// Customer and shipping input for a checkout submission.
///
/// Every field defaults to empty so that missing JSON keys surface as
/// validation failures listing the field, not as a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutInfo {
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub shipping_street: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_zip_code: String,
}

/// One requested order line: a product and a quantity.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A successfully placed order with its display-ready items.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutReceipt {
    pub order: Order,
    pub items: Vec<OrderItemDetail>,
}

/// Errors produced by the checkout pipeline.
#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    /// One or more input fields are missing or malformed. Nothing was
    /// persisted.
    #[error("Validation failed for: {}", fields.join(", "))]
    Validation { fields: Vec<String> },

    /// A store-level rule failed (unknown product, insufficient stock).
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Run the checkout pipeline against the given store.
///
/// Pricing always uses the catalog's current unit prices, never anything
/// the client supplied, so a tampered request cannot change what is
/// charged.
///
/// # Errors
///
/// - [`CheckoutError::Validation`] listing every offending field; hard
///   stop before any store access.
/// - [`CheckoutError::Store`] when a product is unknown or a quantity
///   exceeds stock. No order is persisted.
pub fn submit_checkout(
    store: &Store,
    info: CheckoutInfo,
    lines: &[LineItemRequest],
) -> Result<CheckoutReceipt, CheckoutError> {
    let customer_email = validate(&info, lines)?;

    // Resolve every line against the catalog before pricing
    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let product = store
            .product(line.product_id)
            .ok_or(StoreError::ProductNotFound(line.product_id))?;
        if line.quantity > product.stock {
            return Err(StoreError::InsufficientStock {
                name: product.name,
                requested: line.quantity,
                available: product.stock,
            }
            .into());
        }
        priced.push((product.price, line.quantity));
    }

    let totals = pricing::price_order(&priced);

    let order = Order {
        id: OrderId::generate(),
        customer_first_name: info.customer_first_name,
        customer_last_name: info.customer_last_name,
        customer_email,
        customer_phone: info.customer_phone,
        shipping_street: info.shipping_street,
        shipping_city: info.shipping_city,
        shipping_state: info.shipping_state,
        shipping_zip_code: info.shipping_zip_code,
        subtotal: totals.subtotal,
        shipping: totals.shipping,
        tax: totals.tax,
        total: totals.total,
        payment_status: PaymentStatus::Pending,
        stripe_payment_intent_id: None,
        created_at: Utc::now(),
    };

    let drafts: Vec<OrderLineDraft> = lines
        .iter()
        .zip(&priced)
        .map(|(line, &(unit_price, _))| OrderLineDraft {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price,
        })
        .collect();

    let (order, items) = store.place_order(order, &drafts)?;

    Ok(CheckoutReceipt { order, items })
}

/// Check all customer/shipping fields and quantities; returns the parsed
/// customer email on success.
fn validate(info: &CheckoutInfo, lines: &[LineItemRequest]) -> Result<Email, CheckoutError> {
    let mut fields = Vec::new();

    for (name, value) in [
        ("customerFirstName", &info.customer_first_name),
        ("customerLastName", &info.customer_last_name),
        ("customerPhone", &info.customer_phone),
        ("shippingStreet", &info.shipping_street),
        ("shippingCity", &info.shipping_city),
        ("shippingState", &info.shipping_state),
        ("shippingZipCode", &info.shipping_zip_code),
    ] {
        if value.is_empty() {
            fields.push(name.to_string());
        }
    }

    let email = match Email::parse(&info.customer_email) {
        Ok(email) => Some(email),
        Err(_) => {
            fields.push("customerEmail".to_string());
            None
        }
    };

    for (index, line) in lines.iter().enumerate() {
        if line.quantity == 0 {
            fields.push(format!("items[{index}].quantity"));
        }
    }

    match email {
        Some(email) if fields.is_empty() => Ok(email),
        _ => Err(CheckoutError::Validation { fields }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use luxecuffs_core::Money;

    use crate::models::NewProduct;

    use super::*;

    fn seeded_store() -> (Store, ProductId, ProductId) {
        let store = Store::new();
        let hundred = store.create_product(NewProduct {
            name: "Classic Gold Heritage".to_string(),
            description: "Timeless 18k gold cufflinks".to_string(),
            price: Money::from_cents(10000),
            image_url: "https://img.example/gold.jpg".to_string(),
            material: "Gold".to_string(),
            stock: 10,
            featured: false,
        });
        let fifty = store.create_product(NewProduct {
            name: "Modern Silver Edge".to_string(),
            description: "Contemporary sterling silver".to_string(),
            price: Money::from_cents(5000),
            image_url: "https://img.example/silver.jpg".to_string(),
            material: "Silver".to_string(),
            stock: 10,
            featured: false,
        });
        (store, hundred.id, fifty.id)
    }

    fn valid_info() -> CheckoutInfo {
        CheckoutInfo {
            customer_first_name: "Ada".to_string(),
            customer_last_name: "Lovelace".to_string(),
            customer_email: "ada@example.com".to_string(),
            customer_phone: "555-0100".to_string(),
            shipping_street: "1 Analytical Way".to_string(),
            shipping_city: "London".to_string(),
            shipping_state: "LDN".to_string(),
            shipping_zip_code: "12345".to_string(),
        }
    }

    #[test]
    fn test_happy_path_totals_and_snapshot() {
        let (store, hundred, fifty) = seeded_store();

        let receipt = submit_checkout(
            &store,
            valid_info(),
            &[
                LineItemRequest {
                    product_id: hundred,
                    quantity: 2,
                },
                LineItemRequest {
                    product_id: fifty,
                    quantity: 1,
                },
            ],
        )
        .unwrap();

        assert_eq!(receipt.order.subtotal.to_string(), "250.00");
        assert_eq!(receipt.order.shipping.to_string(), "15.00");
        assert_eq!(receipt.order.tax.to_string(), "20.00");
        assert_eq!(receipt.order.total.to_string(), "285.00");
        assert_eq!(receipt.order.payment_status, PaymentStatus::Pending);
        assert_eq!(receipt.items.len(), 2);

        // Stock was reserved as part of persistence
        assert_eq!(store.product(hundred).unwrap().stock, 8);
        assert_eq!(store.product(fifty).unwrap().stock, 9);
    }

    #[test]
    fn test_validation_lists_every_offending_field() {
        let (store, hundred, _) = seeded_store();

        let info = CheckoutInfo {
            customer_first_name: String::new(),
            customer_email: "not-an-email".to_string(),
            ..valid_info()
        };
        let err = submit_checkout(
            &store,
            info,
            &[LineItemRequest {
                product_id: hundred,
                quantity: 0,
            }],
        )
        .unwrap_err();

        let CheckoutError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            fields,
            vec!["customerFirstName", "customerEmail", "items[0].quantity"]
        );

        // Hard stop: nothing persisted, nothing reserved
        assert!(store.list_orders().is_empty());
        assert_eq!(store.product(hundred).unwrap().stock, 10);
    }

    #[test]
    fn test_unknown_product() {
        let (store, _, _) = seeded_store();

        let err = submit_checkout(
            &store,
            valid_info(),
            &[LineItemRequest {
                product_id: ProductId::generate(),
                quantity: 1,
            }],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Store(StoreError::ProductNotFound(_))
        ));
        assert!(store.list_orders().is_empty());
    }

    #[test]
    fn test_insufficient_stock_persists_nothing() {
        let (store, hundred, _) = seeded_store();

        let err = submit_checkout(
            &store,
            valid_info(),
            &[LineItemRequest {
                product_id: hundred,
                quantity: 11,
            }],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            CheckoutError::Store(StoreError::InsufficientStock { .. })
        ));
        assert!(store.list_orders().is_empty());
        assert_eq!(store.product(hundred).unwrap().stock, 10);
    }

    #[test]
    fn test_pricing_uses_catalog_price() {
        let (store, hundred, _) = seeded_store();

        // The request carries no price at all; only the catalog matters
        let receipt = submit_checkout(
            &store,
            valid_info(),
            &[LineItemRequest {
                product_id: hundred,
                quantity: 1,
            }],
        )
        .unwrap();

        assert_eq!(
            receipt.items.first().unwrap().item.price,
            Money::from_cents(10000)
        );
    }
}
