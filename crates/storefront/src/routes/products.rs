//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use luxecuffs_core::{Money, ProductId};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{Product, ProductFilter};
use crate::state::AppState;

/// Catalog listing query parameters.
///
/// `search` takes precedence; otherwise the remaining criteria form a
/// conjunctive filter, and with nothing set the whole catalog is returned.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub material: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

/// List products, optionally searched or filtered.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<Vec<Product>> {
    let products = if let Some(search) = query.search.filter(|s| !s.is_empty()) {
        state.store().search_products(&search)
    } else {
        let filter = ProductFilter {
            material: query.material,
            min_price: query.min_price,
            max_price: query.max_price,
        };
        if filter.is_empty() {
            state.store().list_products()
        } else {
            state.store().filter_products(&filter)
        }
    };

    Json(products)
}

/// Featured products.
pub async fn featured(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.store().featured_products())
}

/// Single product by id.
///
/// # Errors
///
/// Returns 404 if the product does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>> {
    state
        .store()
        .product(id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
