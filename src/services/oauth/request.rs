//! Read-only view of one authorization request.
//!
//! This module is intentionally framework-free on the parameter side: the
//! handler collects query/form parameters into a plain map and lends it to
//! the validator for the duration of a single call. Nothing here is stored.

use std::collections::HashMap;

use axum::http::Method;

/// OAuth 2.0 / OIDC parameter names used by the authorize endpoint.
pub mod param {
    pub const CLIENT_ID: &str = "client_id";
    pub const RESPONSE_TYPE: &str = "response_type";
    pub const SCOPE: &str = "scope";
    pub const REQUEST: &str = "request";
    pub const REQUEST_URI: &str = "request_uri";
    pub const REDIRECT_URI: &str = "redirect_uri";
}

/// The `openid` scope value required by OIDC flows that return an ID token.
pub const OPENID_SCOPE: &str = "openid";

/// Borrowed view over one authorization request.
///
/// Lives only for the validation call; the transport layer owns the data.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizeRequest<'a> {
    params: &'a HashMap<String, String>,
    method: &'a Method,
    content_type: Option<&'a str>,
}

impl<'a> AuthorizeRequest<'a> {
    pub fn new(
        params: &'a HashMap<String, String>,
        method: &'a Method,
        content_type: Option<&'a str>,
    ) -> Self {
        Self {
            params,
            method,
            content_type,
        }
    }

    /// Raw parameter value, if the parameter was sent at all.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.params.get(name).map(String::as_str)
    }

    /// A parameter is blank when it is absent, empty, or whitespace-only.
    pub fn is_blank(&self, name: &str) -> bool {
        self.param(name).is_none_or(|v| v.trim().is_empty())
    }

    pub fn method(&self) -> &Method {
        self.method
    }

    pub fn content_type(&self) -> Option<&'a str> {
        self.content_type
    }
}
