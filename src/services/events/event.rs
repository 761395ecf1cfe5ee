//! User-management event notifications consumed by this service.

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::repos::user_store::UserStore;

/// Names of the user-store operations this service can be notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventName {
    PostSetUserClaim,
    PostSetUserClaims,
    PostUpdateCredential,
    PostDeleteUser,
}

impl EventName {
    /// Parse the wire name used by the user-management side.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "POST_SET_USER_CLAIM" => Some(Self::PostSetUserClaim),
            "POST_SET_USER_CLAIMS" => Some(Self::PostSetUserClaims),
            "POST_UPDATE_CREDENTIAL" => Some(Self::PostUpdateCredential),
            "POST_DELETE_USER" => Some(Self::PostDeleteUser),
            _ => None,
        }
    }
}

/// One user-management notification.
///
/// `account_state` is the error code the claim-update step recorded for the
/// user while producing this event (`None` when the account stayed active).
/// It travels on the event value itself so that concurrent evaluations for
/// different users never observe each other's state.
#[derive(Clone)]
pub struct UserEvent {
    pub id: Uuid,
    pub name: EventName,
    pub username: String,
    pub user_store: Arc<dyn UserStore>,
    pub account_state: Option<String>,
}

impl UserEvent {
    pub fn new(name: EventName, username: impl Into<String>, user_store: Arc<dyn UserStore>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            username: username.into(),
            user_store,
            account_state: None,
        }
    }

    pub fn with_account_state(mut self, code: impl Into<String>) -> Self {
        self.account_state = Some(code.into());
        self
    }
}

impl fmt::Debug for UserEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEvent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("user_store", &self.user_store.domain_name())
            .field("account_state", &self.account_state)
            .finish()
    }
}
