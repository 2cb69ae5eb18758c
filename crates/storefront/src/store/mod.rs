//! In-memory record store.
//!
//! Holds products, orders, order items, and users as keyed collections
//! behind `RwLock`s. The store is an explicit object created in `main` and
//! shared through [`crate::state::AppState`]; nothing in the crate touches
//! ambient global state.
//!
//! Every read hands back an owned snapshot, so results are never
//! invalidated by later writes. Lookups by id return `Option` rather than
//! panicking; callers decide whether absence is fatal.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use luxecuffs_core::{OrderId, OrderItemId, ProductId, UserId};

use crate::models::{Order, OrderItem, Product, User};

pub mod orders;
pub mod products;
pub mod seed;
pub mod users;

pub use orders::OrderLineDraft;

/// Errors surfaced by store operations that enforce business rules.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced order does not exist.
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),

    /// The referenced product does not exist.
    #[error("Product {0} not found")]
    ProductNotFound(ProductId),

    /// A requested quantity exceeds the product's available stock.
    #[error("Insufficient stock for {name}")]
    InsufficientStock {
        name: String,
        requested: u32,
        available: u32,
    },
}

/// Keyed in-memory collections for all four entity types.
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) products: RwLock<HashMap<ProductId, Product>>,
    pub(crate) orders: RwLock<HashMap<OrderId, Order>>,
    pub(crate) order_items: RwLock<HashMap<OrderItemId, OrderItem>>,
    pub(crate) users: RwLock<HashMap<UserId, User>>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

// The maps stay structurally valid even if a writer panicked mid-request,
// so the poison flag carries no information here.
pub(crate) fn read_guard<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write_guard<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
