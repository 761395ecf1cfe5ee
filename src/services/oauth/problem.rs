//! Structured validation failures for the authorize endpoint.

use thiserror::Error;

/// OAuth error codes surfaced by the validation rules implemented here.
///
/// The full OAuth/OIDC catalogue is much larger; only the codes these rules
/// can produce are listed.
pub mod error_code {
    pub const INVALID_REQUEST: &str = "invalid_request";
}

/// Which error namespace a problem belongs to.
///
/// The authorization endpoint delivers code-response errors in the redirect
/// query component and token-response errors in the fragment, so the
/// namespace is part of the observable contract even when both render the
/// same error code string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorNamespace {
    CodeResponse,
    TokenResponse,
}

/// A terminal validation failure for one authorization request.
///
/// The caller is expected to translate this straight into a client-facing
/// error response and stop processing the request.
#[derive(Debug, Clone, Error)]
#[error("{code}: {description}")]
pub struct OAuthProblem {
    pub code: &'static str,
    pub description: String,
    pub namespace: ErrorNamespace,
}

impl OAuthProblem {
    pub fn invalid_request(namespace: ErrorNamespace, description: impl Into<String>) -> Self {
        Self {
            code: error_code::INVALID_REQUEST,
            description: description.into(),
            namespace,
        }
    }
}
