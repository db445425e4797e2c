//! Typed builder for registrations.

use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::crypto::EmailHasher;
use crate::user::{UnpreparedUser, UserService};

/// Registration builder.
///
/// Both `username` and `email` must be set before [`UserBuilder::build`]
/// becomes available.
#[derive(Debug, Clone)]
pub struct UserBuilder<Username, Email> {
    username: Username,
    email: Email,
}

/// Value is missing on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Missing;

/// Value is present on [`UserBuilder`].
#[derive(Debug, Clone)]
pub struct Present<T>(pub T);

impl UserBuilder<Missing, Missing> {
    /// Create a new [`UserBuilder`].
    pub fn new() -> Self {
        Self {
            username: Missing,
            email: Missing,
        }
    }
}

impl Default for UserBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Email> UserBuilder<Missing, Email> {
    /// Update `username` field on [`UserBuilder`].
    pub fn username(
        self,
        username: impl Into<String>,
    ) -> UserBuilder<Present<String>, Email> {
        UserBuilder {
            username: Present(username.into()),
            email: self.email,
        }
    }
}

impl<Username> UserBuilder<Username, Missing> {
    /// Update `email` field on [`UserBuilder`].
    pub fn email(
        self,
        email: impl Into<String>,
    ) -> UserBuilder<Username, Present<String>> {
        UserBuilder {
            username: self.username,
            email: Present(email.into()),
        }
    }
}

impl UserBuilder<Present<String>, Present<String>> {
    /// Build a [`UserService`] ready to register the user.
    pub fn build(
        self,
        pool: Pool<Postgres>,
        hasher: Arc<EmailHasher>,
    ) -> UserService {
        let user = UnpreparedUser {
            username: self.username.0,
            email: self.email.0,
        };

        UserService::new(user, pool, hasher)
    }
}
