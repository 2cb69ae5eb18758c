//! Product catalog records.

use chrono::{DateTime, Utc};
use luxecuffs_core::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: String,
    /// Material tag used for faceted filtering (e.g. "Gold", "Silver").
    pub material: String,
    pub stock: u32,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a product (admin API).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image_url: String,
    pub material: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update for a product; omitted fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub image_url: Option<String>,
    pub material: Option<String>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
}

impl ProductUpdate {
    /// Apply this patch to an existing product.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image_url) = self.image_url {
            product.image_url = image_url;
        }
        if let Some(material) = self.material {
            product.material = material;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
    }
}

/// Conjunctive catalog filter; `None` criteria are no-ops.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub material: Option<String>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
}

impl ProductFilter {
    /// Whether any criterion is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.material.is_none() && self.min_price.is_none() && self.max_price.is_none()
    }

    /// Whether the given product satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(material) = &self.material {
            if &product.material != material {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if product.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if product.price > max {
                return false;
            }
        }
        true
    }
}
