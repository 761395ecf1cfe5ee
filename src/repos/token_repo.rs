//! DB access for issued-token persistence.
//!
//! Notes:
//! - Issuance writes these rows elsewhere; this service only flips them to
//!   revoked. The schema is assumed to have at least these columns:
//!   - oauth_tokens.id (uuid)
//!   - oauth_tokens.user_domain (text)
//!   - oauth_tokens.username (text)
//!   - oauth_tokens.token_kind (text) // 'access' | 'refresh'
//!   - oauth_tokens.expires_at (timestamptz)
//!   - oauth_tokens.revoked_at (timestamptz, nullable)

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::repos::error::RepoError;

#[derive(Clone, Debug)]
pub struct TokenRepo {
    pool: PgPool,
}

impl TokenRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Revoke every still-active token issued to a principal.
    ///
    /// Returns the number of rows flipped; already-revoked rows are left
    /// untouched, so the call is idempotent.
    pub async fn revoke_all_for_user(
        &self,
        user_domain: &str,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<u64, RepoError> {
        let done = sqlx::query(
            r#"
            UPDATE oauth_tokens
            SET revoked_at = $3
            WHERE user_domain = $1
                AND username = $2
                AND revoked_at IS NULL
            "#,
        )
        .bind(user_domain)
        .bind(username)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(done.rows_affected())
    }
}
