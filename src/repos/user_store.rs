//! User-store boundary.
//!
//! The store itself (schema, claim conventions, error codes) belongs to the
//! user-management side of the deployment; this service only needs to
//! resolve principals and name the store a user came from. Kept as a trait
//! so events can carry a reference to whichever store raised them.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

/// Store-specific failure. Callers on the event path must wrap this into
/// their own error taxonomy instead of letting it escape raw.
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("user store db error")]
    Db(#[from] sqlx::Error),

    #[error("user '{0}' not found in store")]
    UnknownUser(String),
}

/// Minimal user-store surface consumed by the token-revocation path.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Domain name of this store (e.g. `PRIMARY`), used to qualify
    /// usernames in token rows and cache keys.
    fn domain_name(&self) -> &str;

    /// Resolve the canonical (store-cased) username for a principal.
    async fn canonical_username(&self, username: &str) -> Result<String, UserStoreError>;
}

/// Postgres-backed default store.
#[derive(Clone, Debug)]
pub struct SqlUserStore {
    pool: PgPool,
    domain: String,
}

impl SqlUserStore {
    pub fn new(pool: PgPool, domain: impl Into<String>) -> Self {
        Self {
            pool,
            domain: domain.into(),
        }
    }
}

#[async_trait]
impl UserStore for SqlUserStore {
    fn domain_name(&self) -> &str {
        &self.domain
    }

    async fn canonical_username(&self, username: &str) -> Result<String, UserStoreError> {
        let row = sqlx::query_scalar::<_, String>(
            r#"
            SELECT "userName"
            FROM users
            WHERE lower("userName") = lower($1)
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or_else(|| UserStoreError::UnknownUser(username.to_string()))
    }
}
