use std::sync::Arc;

use crate::repos::user_store::SqlUserStore;
use crate::services::events::EventDispatcher;
use crate::services::oauth::HybridFlowValidator;

#[derive(Clone)]
pub struct AppState {
    pub validator: HybridFlowValidator,
    pub dispatcher: Arc<EventDispatcher>,
    pub user_store: Arc<SqlUserStore>,
}

impl AppState {
    pub fn new(
        validator: HybridFlowValidator,
        dispatcher: Arc<EventDispatcher>,
        user_store: Arc<SqlUserStore>,
    ) -> Self {
        Self {
            validator,
            dispatcher,
            user_store,
        }
    }
}
