//! Hybrid-flow (`code token` / `code id_token token`) authorize request
//! validation - core logic.
//!
//! This module is intentionally "core-only": it does not know about Axum
//! extractors or the grant pipeline. The handler builds an
//! `AuthorizeRequest` view and calls `validate`.

use axum::http::Method;

use crate::services::oauth::problem::{ErrorNamespace, OAuthProblem};
use crate::services::oauth::request::{AuthorizeRequest, OPENID_SCOPE, param};

/// One named set of parameter rules for a flow variant.
#[derive(Debug, Clone, Copy)]
pub struct ParamRules {
    pub required: &'static [&'static str],
    pub disallowed: &'static [&'static str],
}

/// Default rules for a bare hybrid-flow authorization request.
pub const CODE_TOKEN_RULES: ParamRules = ParamRules {
    required: &[param::RESPONSE_TYPE, param::CLIENT_ID],
    disallowed: &[],
};

/// Rules when the client sends a `request_uri` reference instead of inline
/// parameters: `request_uri` becomes mandatory and the inline `request`
/// object must not also be present.
pub const REQUEST_URI_RULES: ParamRules = ParamRules {
    required: &[
        param::CLIENT_ID,
        param::RESPONSE_TYPE,
        param::SCOPE,
        param::REQUEST_URI,
    ],
    disallowed: &[param::REQUEST],
};

/// Generic required/disallowed parameter checking.
///
/// The default implementation is the standard check shared by all response
/// types; flow validators delegate to it and then layer their own rules on
/// top.
pub trait BaseParameterCheck {
    fn check_params(
        &self,
        request: &AuthorizeRequest<'_>,
        rules: &ParamRules,
    ) -> Result<(), OAuthProblem> {
        for name in rules.required {
            if request.is_blank(name) {
                return Err(OAuthProblem::invalid_request(
                    ErrorNamespace::TokenResponse,
                    format!("Missing required parameter '{name}'."),
                ));
            }
        }
        for name in rules.disallowed {
            if request.param(name).is_some() {
                return Err(OAuthProblem::invalid_request(
                    ErrorNamespace::TokenResponse,
                    format!("Parameter '{name}' is not allowed in this request."),
                ));
            }
        }
        Ok(())
    }
}

/// Stateless default implementation of `BaseParameterCheck`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultParameterCheck;

impl BaseParameterCheck for DefaultParameterCheck {}

/// Validator for hybrid-flow authorize requests.
///
/// Stateless and re-entrant: every decision is a pure function of the
/// request view passed in, so one instance can be shared across requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridFlowValidator<C = DefaultParameterCheck> {
    base: C,
}

impl HybridFlowValidator<DefaultParameterCheck> {
    pub fn new() -> Self {
        Self::with_base(DefaultParameterCheck)
    }
}

impl<C: BaseParameterCheck> HybridFlowValidator<C> {
    pub fn with_base(base: C) -> Self {
        Self { base }
    }

    /// Pick the rule set for this request.
    ///
    /// Selection is per call; the rule sets are named constants so a reused
    /// validator can never carry over the previous request's choice.
    fn select_param_rules(request: &AuthorizeRequest<'_>) -> &'static ParamRules {
        if !request.is_blank(param::REQUEST_URI) {
            &REQUEST_URI_RULES
        } else {
            &CODE_TOKEN_RULES
        }
    }

    /// Required/disallowed parameter check plus the hybrid-flow scope rule.
    pub fn validate_required_parameters(
        &self,
        request: &AuthorizeRequest<'_>,
    ) -> Result<(), OAuthProblem> {
        let rules = Self::select_param_rules(request);
        self.base.check_params(request, rules)?;

        // The hybrid response type returns an ID token, so the scope list
        // must contain 'openid'. This runs for every request, whichever
        // rule set applied above.
        let scope = request.param(param::SCOPE).unwrap_or_default();
        if scope.trim().is_empty() || !contains_openid_scope(scope) {
            let client_id = request.param(param::CLIENT_ID).unwrap_or_default();
            return Err(OAuthProblem::invalid_request(
                ErrorNamespace::TokenResponse,
                format!(
                    "Request with 'client_id' = '{client_id}' has 'response_type' for \
                     'hybrid flow'; but 'openid' scope not found."
                ),
            ));
        }
        Ok(())
    }

    /// The authorize endpoint accepts only GET and POST.
    pub fn validate_method(&self, request: &AuthorizeRequest<'_>) -> Result<(), OAuthProblem> {
        let method = request.method();
        if method != Method::GET && method != Method::POST {
            return Err(OAuthProblem::invalid_request(
                ErrorNamespace::CodeResponse,
                "Method not correct.",
            ));
        }
        Ok(())
    }

    /// Content-type enforcement is disabled for this response type; any
    /// value, including none at all, is accepted as-is.
    pub fn validate_content_type(&self, request: &AuthorizeRequest<'_>) -> Result<(), OAuthProblem> {
        let _ = request.content_type();
        Ok(())
    }

    /// Full per-request validation entry point.
    pub fn validate(&self, request: &AuthorizeRequest<'_>) -> Result<(), OAuthProblem> {
        self.validate_method(request)?;
        self.validate_content_type(request)?;
        self.validate_required_parameters(request)?;
        Ok(())
    }
}

/// Whether the whitespace-separated scope list contains `openid`.
fn contains_openid_scope(scope: &str) -> bool {
    scope.split_whitespace().any(|s| s == OPENID_SCOPE)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::services::oauth::problem::error_code;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn request<'a>(map: &'a HashMap<String, String>, method: &'a Method) -> AuthorizeRequest<'a> {
        AuthorizeRequest::new(map, method, None)
    }

    #[test]
    fn accepts_well_formed_hybrid_request() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "openid profile"),
        ]);
        let validator = HybridFlowValidator::new();
        assert!(validator.validate(&request(&map, &Method::GET)).is_ok());
    }

    #[test]
    fn accepts_request_uri_variant() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "openid"),
            ("request_uri", "https://client.example.org/request.jwt"),
        ]);
        let validator = HybridFlowValidator::new();
        assert!(validator.validate(&request(&map, &Method::POST)).is_ok());
    }

    #[test]
    fn rejects_inline_request_object_alongside_request_uri() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "openid"),
            ("request_uri", "https://client.example.org/request.jwt"),
            ("request", "eyJhbGciOi..."),
        ]);
        let validator = HybridFlowValidator::new();
        let err = validator.validate(&request(&map, &Method::GET)).unwrap_err();
        assert_eq!(err.code, error_code::INVALID_REQUEST);
        assert_eq!(err.namespace, ErrorNamespace::TokenResponse);
    }

    #[test]
    fn request_uri_variant_requires_scope_parameter() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("request_uri", "https://client.example.org/request.jwt"),
        ]);
        let validator = HybridFlowValidator::new();
        let err = validator.validate(&request(&map, &Method::GET)).unwrap_err();
        assert_eq!(err.code, error_code::INVALID_REQUEST);
    }

    #[test]
    fn rejects_scope_without_openid_and_names_the_client() {
        let map = params(&[
            ("client_id", "my-spa-client"),
            ("response_type", "code token"),
            ("scope", "profile email"),
        ]);
        let validator = HybridFlowValidator::new();
        let err = validator.validate(&request(&map, &Method::GET)).unwrap_err();
        assert_eq!(err.code, error_code::INVALID_REQUEST);
        assert!(err.description.contains("my-spa-client"));
        assert!(err.description.contains("openid"));
    }

    #[test]
    fn rejects_openid_as_substring_of_another_scope() {
        // "openid2" must not satisfy the check; tokens are compared whole.
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "openid2 profile"),
        ]);
        let validator = HybridFlowValidator::new();
        assert!(validator.validate(&request(&map, &Method::GET)).is_err());
    }

    #[test]
    fn whitespace_only_scope_is_treated_as_blank() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "   "),
        ]);
        let validator = HybridFlowValidator::new();
        let err = validator.validate(&request(&map, &Method::GET)).unwrap_err();
        assert!(err.description.contains("client-1"));
    }

    #[test]
    fn scope_split_handles_repeated_whitespace() {
        let map = params(&[
            ("client_id", "client-1"),
            ("response_type", "code token"),
            ("scope", "profile \t  openid"),
        ]);
        let validator = HybridFlowValidator::new();
        assert!(validator.validate(&request(&map, &Method::GET)).is_ok());
    }

    #[test]
    fn missing_client_id_scope_error_embeds_empty_value() {
        // The scope failure must embed client_id verbatim even when absent.
        let map = params(&[("response_type", "code token"), ("scope", "openid")]);
        let validator = HybridFlowValidator::new();
        // Base check fires first on the missing client_id.
        let err = validator
            .validate_required_parameters(&request(&map, &Method::GET))
            .unwrap_err();
        assert_eq!(err.code, error_code::INVALID_REQUEST);

        // With a base check that passes everything through, the scope rule
        // still renders the absent client_id as an empty string.
        struct PassThrough;
        impl BaseParameterCheck for PassThrough {
            fn check_params(
                &self,
                _request: &AuthorizeRequest<'_>,
                _rules: &ParamRules,
            ) -> Result<(), OAuthProblem> {
                Ok(())
            }
        }
        let map = params(&[("response_type", "code token"), ("scope", "profile")]);
        let validator = HybridFlowValidator::with_base(PassThrough);
        let err = validator
            .validate_required_parameters(&request(&map, &Method::GET))
            .unwrap_err();
        assert!(err.description.contains("'client_id' = ''"));
    }

    #[test]
    fn method_check_rejects_anything_but_get_and_post() {
        let map = params(&[]);
        let validator = HybridFlowValidator::new();

        for method in [Method::GET, Method::POST] {
            assert!(validator.validate_method(&request(&map, &method)).is_ok());
        }
        for method in [Method::PUT, Method::DELETE, Method::PATCH, Method::HEAD] {
            let err = validator
                .validate_method(&request(&map, &method))
                .unwrap_err();
            assert_eq!(err.code, error_code::INVALID_REQUEST);
            assert_eq!(err.namespace, ErrorNamespace::CodeResponse);
        }
    }

    #[test]
    fn content_type_check_never_rejects() {
        let map = params(&[]);
        let validator = HybridFlowValidator::new();
        for ct in [None, Some(""), Some("text/plain"), Some("application/json")] {
            let req = AuthorizeRequest::new(&map, &Method::POST, ct);
            assert!(validator.validate_content_type(&req).is_ok());
        }
    }
}
