//! Token authority boundary.
//!
//! Issuance, storage and the physical shape of tokens live behind this
//! trait; the event side of this service only ever commands revocation.

use async_trait::async_trait;
use thiserror::Error;

use crate::repos::error::RepoError;
use crate::repos::user_store::{UserStore, UserStoreError};
use crate::services::cache::CacheError;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("token store failure")]
    Repo(#[from] RepoError),

    #[error("claims cache failure")]
    Cache(#[from] CacheError),

    #[error(transparent)]
    UserStore(#[from] UserStoreError),
}

/// Revocation surface of the token authority.
///
/// Both operations are idempotent on the authority side; callers treat them
/// as fire-and-forget commands and only propagate failures.
#[async_trait]
pub trait TokenAuthority: Send + Sync {
    /// Revoke all active access/refresh tokens issued to this principal.
    async fn revoke_all_tokens(
        &self,
        username: &str,
        store: &dyn UserStore,
    ) -> Result<(), AuthorityError>;

    /// Drop any cached user-claims entry for this principal.
    async fn invalidate_cached_claims(
        &self,
        username: &str,
        store: &dyn UserStore,
    ) -> Result<(), AuthorityError>;
}
