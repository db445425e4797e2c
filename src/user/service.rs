use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::crypto::EmailHasher;
use crate::database::{ConflictKind, classify_conflict};
use crate::error::{Result, ServerError};
use crate::user::{UnpreparedUser, User, UserRepository};

/// User registrar.
#[derive(Clone)]
pub struct UserService {
    pub repo: UserRepository,
    pub hasher: Arc<EmailHasher>,
    pub data: UnpreparedUser,
}

impl UserService {
    /// Create a new [`UserService`].
    pub fn new(
        user: UnpreparedUser,
        pool: Pool<Postgres>,
        hasher: Arc<EmailHasher>,
    ) -> Self {
        Self {
            data: user,
            repo: UserRepository::new(pool),
            hasher,
        }
    }

    /// Register the built user.
    ///
    /// Derives the email digest, inserts, then classifies whatever uniqueness
    /// constraint the backend names. No existence check happens before the
    /// insert: two racing registrations resolve to exactly one row and one
    /// conflict. Non-uniqueness failures propagate unchanged.
    pub async fn create_user(self) -> Result<()> {
        let hash = self.hasher.digest(&self.data.email);

        match self.repo.insert(&self.data.username, &hash).await {
            Ok(()) => Ok(()),
            Err(err) => Err(match classify_conflict(&err) {
                Some(ConflictKind::Username) => {
                    ServerError::UsernameTaken(self.data.username)
                },
                Some(ConflictKind::EmailHash) => {
                    ServerError::EmailRegistered(self.data.email)
                },
                Some(ConflictKind::Other) => ServerError::UserAlreadyExists,
                None => ServerError::Sql(err),
            }),
        }
    }

    /// Fetch the persisted row for the built username.
    pub async fn find_by_username(&self) -> Result<User> {
        self.repo.find_by_username(&self.data.username).await
    }
}
