//! database (db) union structure.
use axum::extract::FromRef;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::AppState;

pub const DEFAULT_CREDENTIALS: &str = "postgres";
pub const DEFAULT_DATABASE_NAME: &str = "enroll";
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Named uniqueness constraint on the `username` column.
pub const USERNAME_CONSTRAINT: &str = "users_username_unique";
/// Named uniqueness constraint on the `hash` column.
pub const HASH_CONSTRAINT: &str = "users_hash_unique";

/// Custom db structure to pass to Axum.
#[derive(Clone)]
pub struct Database {
    pub postgres: PgPool,
}

impl Database {
    /// Init database connections.
    pub async fn new(
        hostname: &str,
        username: &str,
        password: &str,
        db: &str,
        pool: u32,
    ) -> Result<Self, sqlx::Error> {
        let addr = format!("postgres://{username}:{password}@{hostname}/{db}");
        let pool = PgPoolOptions::new().max_connections(pool);
        let postgres = pool.connect(&addr).await?;

        tracing::info!(%hostname, %db, "postgres connected");

        Ok(Self { postgres })
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(app_state: &AppState) -> Database {
        app_state.db.clone()
    }
}

/// Uniqueness conflict reported by the storage backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// `username` column collided.
    Username,
    /// Email digest (`hash` column) collided.
    EmailHash,
    /// Uniqueness violation on a constraint this crate does not know.
    Other,
}

/// Identify which uniqueness constraint, if any, a failed insert violated.
///
/// Returns `None` for every non-uniqueness failure (connectivity, schema,
/// unrelated constraints), which callers must propagate unchanged. When both
/// columns collide at once, Postgres names the first violated index in
/// creation order, i.e. `users_username_unique`.
pub fn classify_conflict(err: &sqlx::Error) -> Option<ConflictKind> {
    let db_err = err.as_database_error()?;
    if !db_err.is_unique_violation() {
        return None;
    }

    match db_err.constraint() {
        Some(USERNAME_CONSTRAINT) => Some(ConflictKind::Username),
        Some(HASH_CONSTRAINT) => Some(ConflictKind::EmailHash),
        _ => Some(ConflictKind::Other),
    }
}
