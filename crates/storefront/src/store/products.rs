//! Product collection operations.

use chrono::Utc;
use luxecuffs_core::ProductId;

use crate::models::{NewProduct, Product, ProductFilter, ProductUpdate};

use super::{Store, read_guard, write_guard};

impl Store {
    /// Insert a new product and return the stored record.
    pub fn create_product(&self, new: NewProduct) -> Product {
        let product = Product {
            id: ProductId::generate(),
            name: new.name,
            description: new.description,
            price: new.price,
            image_url: new.image_url,
            material: new.material,
            stock: new.stock,
            featured: new.featured,
            created_at: Utc::now(),
        };
        write_guard(&self.products).insert(product.id, product.clone());
        product
    }

    /// Look up a single product.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        read_guard(&self.products).get(&id).cloned()
    }

    /// Apply a partial update; returns the updated record, or `None` if the
    /// product does not exist.
    pub fn update_product(&self, id: ProductId, update: ProductUpdate) -> Option<Product> {
        let mut products = write_guard(&self.products);
        let product = products.get_mut(&id)?;
        update.apply_to(product);
        Some(product.clone())
    }

    /// Delete a product; returns whether it existed.
    pub fn delete_product(&self, id: ProductId) -> bool {
        write_guard(&self.products).remove(&id).is_some()
    }

    /// All products, newest-created first.
    pub fn list_products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = read_guard(&self.products).values().cloned().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products
    }

    /// Products with the featured flag set.
    pub fn featured_products(&self) -> Vec<Product> {
        read_guard(&self.products)
            .values()
            .filter(|p| p.featured)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match against name, description, and
    /// material. Matches come back in arbitrary order.
    pub fn search_products(&self, query: &str) -> Vec<Product> {
        let query = query.to_lowercase();
        read_guard(&self.products)
            .values()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.material.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }

    /// Conjunctive filter over material and price bounds.
    pub fn filter_products(&self, filter: &ProductFilter) -> Vec<Product> {
        read_guard(&self.products)
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect()
    }
}
