use serde::Serialize;

/// Acknowledgement for a structurally valid authorize request.
///
/// Issuing the actual grant (login, consent, code/token minting) happens in
/// the downstream pipeline; this surface only reports that the request
/// passed validation and was handed off.
#[derive(Debug, Serialize)]
pub struct AuthorizeAccepted {
    pub client_id: String,
    pub response_type: String,
    pub scope: String,
}

/// OAuth error body returned when no usable redirect_uri is present.
#[derive(Debug, Serialize)]
pub struct OAuthErrorBody {
    pub error: &'static str,
    pub error_description: String,
}
