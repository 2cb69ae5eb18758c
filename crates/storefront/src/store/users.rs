//! User collection operations.

use luxecuffs_core::{Email, UserId};

use crate::models::User;

use super::{Store, read_guard, write_guard};

impl Store {
    /// Insert a new user and return the stored record.
    ///
    /// `password_hash` must already be an argon2 PHC string; the store never
    /// sees clear-text passwords.
    pub fn create_user(
        &self,
        username: String,
        password_hash: String,
        email: Option<Email>,
        is_admin: bool,
    ) -> User {
        let user = User {
            id: UserId::generate(),
            username,
            password_hash,
            email,
            is_admin,
        };
        write_guard(&self.users).insert(user.id, user.clone());
        user
    }

    /// Look up a user by unique username.
    pub fn user_by_username(&self, username: &str) -> Option<User> {
        read_guard(&self.users)
            .values()
            .find(|user| user.username == username)
            .cloned()
    }
}
