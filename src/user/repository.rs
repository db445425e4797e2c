//! Handle database requests.

use sqlx::{Pool, Postgres};

use crate::error::Result;
use crate::user::User;

#[derive(Clone)]
pub struct UserRepository {
    pool: Pool<Postgres>,
}

impl UserRepository {
    /// Create a new [`UserRepository`].
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new user row.
    ///
    /// `id`, `created_at` and the remaining nullable columns are left to
    /// backend defaults. Uniqueness is enforced by the backend, so the raw
    /// [`sqlx::Error`] is returned for the caller to classify.
    pub async fn insert(
        &self,
        username: &str,
        hash: &str,
    ) -> std::result::Result<(), sqlx::Error> {
        sqlx::query(
            r#"INSERT INTO users (username, hash, verification_token, verified_at)
                VALUES ($1, $2, NULL, NULL)"#,
        )
        .bind(username)
        .bind(hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Find a user using `username` field.
    pub async fn find_by_username(&self, username: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, username, hash, verification_token,
                verification_token_expires_at, verified_at, created_at,
                last_login
                FROM users WHERE username = $1"#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
