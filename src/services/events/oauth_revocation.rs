//! Token revocation on account-state transitions.
//!
//! The user-management side signals a lock or disable by recording an
//! account-state error code while updating the user's claims; the resulting
//! claim-change event lands here and the user's tokens are revoked.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::services::events::dispatcher::{EventError, EventHandler};
use crate::services::events::event::{EventName, UserEvent};
use crate::services::tokens::authority::{AuthorityError, TokenAuthority};

/// Account-state error codes set by the user store during claim updates.
/// Owned by the user-management component; matched case-insensitively.
pub const USER_IS_LOCKED: &str = "17003";
pub const USER_ACCOUNT_DISABLED: &str = "17004";

const DEFAULT_PRIORITY: i32 = 51;

pub struct OauthRevocationHandler {
    authority: Arc<dyn TokenAuthority>,
    priority_override: Option<i32>,
}

impl OauthRevocationHandler {
    pub fn new(authority: Arc<dyn TokenAuthority>, priority_override: Option<i32>) -> Self {
        Self {
            authority,
            priority_override,
        }
    }

    fn state_matches(event: &UserEvent, code: &str) -> bool {
        event
            .account_state
            .as_deref()
            .is_some_and(|state| state.eq_ignore_ascii_case(code))
    }

    async fn revoke_if_locked(&self, event: &UserEvent) -> Result<(), AuthorityError> {
        if Self::state_matches(event, USER_IS_LOCKED) {
            debug!(username = %event.username, "user is locked, revoking access tokens");
            self.authority
                .revoke_all_tokens(&event.username, event.user_store.as_ref())
                .await?;
        }
        Ok(())
    }

    async fn revoke_if_disabled(&self, event: &UserEvent) -> Result<(), AuthorityError> {
        if Self::state_matches(event, USER_ACCOUNT_DISABLED) {
            debug!(username = %event.username, "user is disabled, revoking access tokens");
            self.authority
                .revoke_all_tokens(&event.username, event.user_store.as_ref())
                .await?;
        }
        Ok(())
    }

    fn execution_error(&self, event: &UserEvent, source: AuthorityError) -> EventError {
        error!(
            username = %event.username,
            error = %source,
            "error occurred while revoking access tokens"
        );
        EventError::HandlerExecution {
            handler: self.name(),
            username: event.username.clone(),
            source,
        }
    }
}

#[async_trait]
impl EventHandler for OauthRevocationHandler {
    fn name(&self) -> &'static str {
        "oauth-revocation"
    }

    fn priority(&self) -> i32 {
        self.priority_override.unwrap_or(DEFAULT_PRIORITY)
    }

    async fn handle(&self, event: &UserEvent) -> Result<(), EventError> {
        if !matches!(
            event.name,
            EventName::PostSetUserClaim | EventName::PostSetUserClaims
        ) {
            return Ok(());
        }

        // Locked and disabled are tested independently: the code spaces
        // belong to the user store and may grow to overlap, so this must
        // not become an if/else.
        self.revoke_if_locked(event)
            .await
            .map_err(|e| self.execution_error(event, e))?;
        self.revoke_if_disabled(event)
            .await
            .map_err(|e| self.execution_error(event, e))?;

        // Cached claims are dropped on every claim change, whether or not
        // revocation fired.
        self.authority
            .invalidate_cached_claims(&event.username, event.user_store.as_ref())
            .await
            .map_err(|e| self.execution_error(event, e))?;

        Ok(())
    }
}
