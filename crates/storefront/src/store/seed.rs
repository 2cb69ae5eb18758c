//! Startup seed data: the admin account and the demo catalog.

use argon2::Argon2;
use argon2::password_hash::{PasswordHasher, SaltString, rand_core::OsRng};
use luxecuffs_core::Money;
use secrecy::ExposeSecret;

use crate::config::AdminSeedConfig;
use crate::models::{NewProduct, Product, User};

use super::Store;

/// Errors that can occur while seeding the store.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// Hashing the admin password failed.
    #[error("failed to hash admin password: {0}")]
    PasswordHash(argon2::password_hash::Error),
}

impl From<argon2::password_hash::Error> for SeedError {
    fn from(err: argon2::password_hash::Error) -> Self {
        Self::PasswordHash(err)
    }
}

impl Store {
    /// Create the admin account from configuration.
    ///
    /// The password is argon2-hashed here; nothing stores or logs the clear
    /// text.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::PasswordHash`] if hashing fails.
    pub fn seed_admin(&self, config: &AdminSeedConfig) -> Result<User, SeedError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(config.password.expose_secret().as_bytes(), &salt)?
            .to_string();

        Ok(self.create_user(config.username.clone(), hash, config.email.clone(), true))
    }

    /// Populate the demo catalog.
    pub fn seed_sample_catalog(&self) -> Vec<Product> {
        sample_products()
            .into_iter()
            .map(|product| self.create_product(product))
            .collect()
    }
}

fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Classic Gold Heritage".to_string(),
            description: "Timeless 18k gold cufflinks with intricate vintage engravings"
                .to_string(),
            price: Money::from_cents(29900),
            image_url: "https://images.unsplash.com/photo-1588444650700-7be9fd5c8db2?w=400"
                .to_string(),
            material: "Gold".to_string(),
            stock: 10,
            featured: true,
        },
        NewProduct {
            name: "Modern Silver Edge".to_string(),
            description: "Contemporary sterling silver with geometric patterns".to_string(),
            price: Money::from_cents(19900),
            image_url: "https://images.unsplash.com/photo-1590736969955-71cc94901144?w=400"
                .to_string(),
            material: "Silver".to_string(),
            stock: 15,
            featured: true,
        },
        NewProduct {
            name: "Diamond Prestige".to_string(),
            description: "Exquisite white gold with genuine diamonds".to_string(),
            price: Money::from_cents(89900),
            image_url: "https://images.unsplash.com/photo-1515562141207-7a88fb7ce338?w=400"
                .to_string(),
            material: "Platinum".to_string(),
            stock: 5,
            featured: true,
        },
        NewProduct {
            name: "Vintage Brass Collection".to_string(),
            description: "Antique-inspired brass with ornate detailing".to_string(),
            price: Money::from_cents(14900),
            image_url: "https://images.unsplash.com/photo-1611652022419-a9419f74343d?w=400"
                .to_string(),
            material: "Brass".to_string(),
            stock: 20,
            featured: false,
        },
        NewProduct {
            name: "Titanium Minimalist".to_string(),
            description: "Ultra-lightweight titanium with brushed finish".to_string(),
            price: Money::from_cents(24900),
            image_url: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=400"
                .to_string(),
            material: "Titanium".to_string(),
            stock: 12,
            featured: false,
        },
        NewProduct {
            name: "Pearl Elegance".to_string(),
            description: "Mother-of-pearl with gold accent details".to_string(),
            price: Money::from_cents(39900),
            image_url: "https://images.unsplash.com/photo-1539874754764-5a96559165b0?w=400"
                .to_string(),
            material: "Gold".to_string(),
            stock: 8,
            featured: false,
        },
    ]
}
