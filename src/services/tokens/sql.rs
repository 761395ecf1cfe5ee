//! Postgres + Valkey token authority.

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use crate::repos::token_repo::TokenRepo;
use crate::repos::user_store::UserStore;
use crate::services::cache::CacheClient;
use crate::services::tokens::authority::{AuthorityError, TokenAuthority};

/// Cache key for a user's claims entry.
///
/// The key embeds the store domain so that identically-named users in
/// different stores never collide.
pub fn claims_cache_key(domain: &str, username: &str) -> String {
    format!("user_claims:{domain}:{username}")
}

#[derive(Clone, Debug)]
pub struct SqlTokenAuthority<C: CacheClient> {
    tokens: TokenRepo,
    cache: C,
}

impl<C: CacheClient> SqlTokenAuthority<C> {
    pub fn new(tokens: TokenRepo, cache: C) -> Self {
        Self { tokens, cache }
    }
}

#[async_trait]
impl<C: CacheClient> TokenAuthority for SqlTokenAuthority<C> {
    async fn revoke_all_tokens(
        &self,
        username: &str,
        store: &dyn UserStore,
    ) -> Result<(), AuthorityError> {
        let canonical = store.canonical_username(username).await?;
        let revoked = self
            .tokens
            .revoke_all_for_user(store.domain_name(), &canonical, Utc::now())
            .await?;
        debug!(username = %canonical, revoked, "revoked active tokens");
        Ok(())
    }

    async fn invalidate_cached_claims(
        &self,
        username: &str,
        store: &dyn UserStore,
    ) -> Result<(), AuthorityError> {
        let canonical = store.canonical_username(username).await?;
        let key = claims_cache_key(store.domain_name(), &canonical);
        self.cache.del(&key).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_scoped_by_store_domain() {
        assert_eq!(
            claims_cache_key("PRIMARY", "alice"),
            "user_claims:PRIMARY:alice"
        );
        assert_ne!(
            claims_cache_key("PRIMARY", "alice"),
            claims_cache_key("SECONDARY", "alice")
        );
    }
}
