/*
 * Responsibility
 * - Define the v1 URL structure
 * - /health, /oauth2/authorize, /events/user
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    authorize::{authorize_get, authorize_post},
    events::notify_user_event,
    health::health,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/oauth2/authorize", get(authorize_get).post(authorize_post))
        .route("/events/user", post(notify_user_event))
}
