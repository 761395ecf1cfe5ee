//! Ingestion endpoint for user-management notifications.
//!
//! The claim-update step runs in the user-management deployment; it posts
//! the resulting event here so registered listeners (token revocation) can
//! react.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::api::v1::dto::events::ClaimsChangeNotice;
use crate::error::AppError;
use crate::services::events::{EventName, UserEvent};
use crate::state::AppState;

pub async fn notify_user_event(
    State(state): State<AppState>,
    Json(notice): Json<ClaimsChangeNotice>,
) -> Result<StatusCode, AppError> {
    let name = EventName::from_wire(&notice.event).ok_or_else(|| {
        AppError::InvalidRequest(format!("unknown event name '{}'", notice.event))
    })?;

    let mut event = UserEvent::new(name, notice.username, state.user_store.clone());
    if let Some(code) = notice.account_state {
        event = event.with_account_state(code);
    }

    state.dispatcher.dispatch(&event).await;

    // Listener failures are handled by the dispatcher's own policy; from
    // the notifier's point of view the event was taken in.
    Ok(StatusCode::ACCEPTED)
}
