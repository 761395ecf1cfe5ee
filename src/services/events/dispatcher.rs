//! Event handler contract and a small priority-ordered dispatcher.
//!
//! This is not a general event bus: it exists so listeners like the token
//! revocation rule have something to register against. Handlers run
//! sequentially, higher priority first, and a failing handler never stops
//! the others (log-and-continue).

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::services::events::event::UserEvent;
use crate::services::tokens::authority::AuthorityError;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("event handler '{handler}' failed for user '{username}'")]
    HandlerExecution {
        handler: &'static str,
        username: String,
        #[source]
        source: AuthorityError,
    },
}

#[async_trait]
pub trait EventHandler: Send + Sync {
    fn name(&self) -> &'static str;

    /// Dispatch order relative to other handlers on the same event;
    /// higher runs first.
    fn priority(&self) -> i32;

    async fn handle(&self, event: &UserEvent) -> Result<(), EventError>;
}

#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        self.handlers.push(handler);
        self.handlers.sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// Deliver one event to every registered handler.
    ///
    /// Handler failures are logged and delivery continues; the failure has
    /// already aborted that handler's own remaining steps.
    pub async fn dispatch(&self, event: &UserEvent) {
        for handler in &self.handlers {
            if let Err(e) = handler.handle(event).await {
                tracing::error!(
                    handler = handler.name(),
                    event = ?event.name,
                    error = %e,
                    "event handler failed"
                );
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::repos::user_store::{UserStore, UserStoreError};
    use crate::services::events::event::EventName;

    struct StubStore;

    #[async_trait]
    impl UserStore for StubStore {
        fn domain_name(&self) -> &str {
            "PRIMARY"
        }

        async fn canonical_username(&self, username: &str) -> Result<String, UserStoreError> {
            Ok(username.to_string())
        }
    }

    struct Recorder {
        name: &'static str,
        priority: i32,
        fail: bool,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl EventHandler for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        async fn handle(&self, event: &UserEvent) -> Result<(), EventError> {
            self.log.lock().unwrap().push(self.name);
            if self.fail {
                return Err(EventError::HandlerExecution {
                    handler: self.name,
                    username: event.username.clone(),
                    source: AuthorityError::UserStore(UserStoreError::UnknownUser(
                        event.username.clone(),
                    )),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatches_in_descending_priority_and_survives_failures() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(Arc::new(Recorder {
            name: "low",
            priority: 10,
            fail: false,
            log: log.clone(),
        }));
        // The failing high-priority handler must not stop the others.
        dispatcher.register(Arc::new(Recorder {
            name: "high",
            priority: 90,
            fail: true,
            log: log.clone(),
        }));
        dispatcher.register(Arc::new(Recorder {
            name: "mid",
            priority: 51,
            fail: false,
            log: log.clone(),
        }));

        let event = UserEvent::new(EventName::PostSetUserClaim, "alice", Arc::new(StubStore));
        dispatcher.dispatch(&event).await;

        assert_eq!(*log.lock().unwrap(), vec!["high", "mid", "low"]);
    }
}
