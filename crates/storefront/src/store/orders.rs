//! Order and order-item collection operations.

use luxecuffs_core::{Money, OrderId, OrderItemId, PaymentStatus, ProductId};

use crate::models::{Order, OrderItem, OrderItemDetail};

use super::{Store, StoreError, read_guard, write_guard};

/// One priced line of an order about to be persisted.
#[derive(Debug, Clone, Copy)]
pub struct OrderLineDraft {
    pub product_id: ProductId,
    pub quantity: u32,
    /// Unit price captured by the checkout pipeline; copied into the stored
    /// item so the order stays accurate across later catalog price changes.
    pub unit_price: Money,
}

impl Store {
    /// Persist an order with its items in one step.
    ///
    /// Availability is re-checked and stock decremented under the products
    /// write lock, so two concurrent checkouts against the same low-stock
    /// product cannot both succeed. If any line fails, nothing is written
    /// and no stock changes.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ProductNotFound`] or
    /// [`StoreError::InsufficientStock`] for the first offending line.
    pub fn place_order(
        &self,
        order: Order,
        lines: &[OrderLineDraft],
    ) -> Result<(Order, Vec<OrderItemDetail>), StoreError> {
        let mut products = write_guard(&self.products);

        // Validate every line before touching anything
        for line in lines {
            let product = products
                .get(&line.product_id)
                .ok_or(StoreError::ProductNotFound(line.product_id))?;
            if line.quantity > product.stock {
                return Err(StoreError::InsufficientStock {
                    name: product.name.clone(),
                    requested: line.quantity,
                    available: product.stock,
                });
            }
        }

        let mut details = Vec::with_capacity(lines.len());
        for line in lines {
            if let Some(product) = products.get_mut(&line.product_id) {
                product.stock -= line.quantity;
                let item = OrderItem {
                    id: OrderItemId::generate(),
                    order_id: order.id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    price: line.unit_price,
                };
                details.push(OrderItemDetail {
                    item,
                    product: product.clone(),
                });
            }
        }

        let mut items = write_guard(&self.order_items);
        for detail in &details {
            items.insert(detail.item.id, detail.item.clone());
        }
        write_guard(&self.orders).insert(order.id, order.clone());

        Ok((order, details))
    }

    /// Look up a single order.
    pub fn order(&self, id: OrderId) -> Option<Order> {
        read_guard(&self.orders).get(&id).cloned()
    }

    /// All orders, newest-created first.
    pub fn list_orders(&self) -> Vec<Order> {
        let mut orders: Vec<Order> = read_guard(&self.orders).values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Transition an order to `paid` and record the gateway reference.
    ///
    /// This is the only mutation path for payment status. Returns the
    /// updated order, or `None` if the order does not exist. Re-applying
    /// `paid` to an already-paid order succeeds.
    pub fn mark_order_paid(&self, id: OrderId, payment_intent_id: &str) -> Option<Order> {
        let mut orders = write_guard(&self.orders);
        let order = orders.get_mut(&id)?;
        order.payment_status = PaymentStatus::Paid;
        order.stripe_payment_intent_id = Some(payment_intent_id.to_owned());
        Some(order.clone())
    }

    /// Items belonging to the given order.
    pub fn order_items(&self, order_id: OrderId) -> Vec<OrderItem> {
        read_guard(&self.order_items)
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    /// An order with its items joined to their products.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::OrderNotFound`] if the order is absent, or
    /// [`StoreError::ProductNotFound`] if an item references a product that
    /// has since been deleted from the catalog.
    pub fn order_with_items(
        &self,
        order_id: OrderId,
    ) -> Result<(Order, Vec<OrderItemDetail>), StoreError> {
        let order = self
            .order(order_id)
            .ok_or(StoreError::OrderNotFound(order_id))?;

        let items = self.order_items(order_id);
        let products = read_guard(&self.products);
        let details = items
            .into_iter()
            .map(|item| {
                let product = products
                    .get(&item.product_id)
                    .ok_or(StoreError::ProductNotFound(item.product_id))?
                    .clone();
                Ok(OrderItemDetail { item, product })
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        Ok((order, details))
    }
}
