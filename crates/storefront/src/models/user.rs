//! Admin account records.

use luxecuffs_core::{Email, UserId};

/// An admin account.
///
/// Passwords are stored as argon2 hashes, never in clear text. The struct
/// deliberately does not implement `Serialize` so the hash cannot leak into
/// a response body; login responses build their own view.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password_hash: String,
    pub email: Option<Email>,
    pub is_admin: bool,
}
