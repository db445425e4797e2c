mod builder;
mod repository;
mod service;

pub use builder::*;
pub use repository::*;
pub use service::*;

use serde::{Deserialize, Serialize};

/// User as saved on database.
#[derive(
    Clone, Debug, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow,
)]
pub struct User {
    /// Surrogate key generated by the backend, never equal to `hash`.
    pub id: String,
    pub username: String,
    /// Keyed digest of the normalized email, 64 lowercase hex characters.
    #[serde(skip)]
    pub hash: String,
    #[serde(skip)]
    pub verification_token: Option<String>,
    #[serde(skip)]
    pub verification_token_expires_at: Option<chrono::NaiveDateTime>,
    pub verified_at: Option<chrono::NaiveDateTime>,
    pub created_at: chrono::NaiveDateTime,
    pub last_login: Option<chrono::NaiveDateTime>,
}

/// Caller-supplied registration input, before digest derivation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UnpreparedUser {
    pub username: String,
    pub email: String,
}
