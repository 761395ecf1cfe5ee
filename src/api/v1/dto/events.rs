use serde::Deserialize;

/// Claim-change notification posted by the user-management side.
#[derive(Debug, Deserialize)]
pub struct ClaimsChangeNotice {
    pub username: String,
    /// Wire name of the operation, e.g. `POST_SET_USER_CLAIMS`.
    pub event: String,
    /// Account-state error code recorded by the claim-update step, if any.
    pub account_state: Option<String>,
}
