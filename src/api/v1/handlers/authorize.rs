//! Authorization endpoint for the hybrid flow.
//!
//! The handler stays thin: collect the raw parameters, lend them to the
//! validator, then translate the outcome. Error delivery follows the OAuth
//! rules: when the client gave a usable absolute `redirect_uri` the error
//! rides back on a redirect (query component for code-response errors,
//! fragment for token-response errors); otherwise a 400 JSON body.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, Method, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use url::Url;

use crate::api::v1::dto::authorize::{AuthorizeAccepted, OAuthErrorBody};
use crate::services::oauth::request::param;
use crate::services::oauth::{AuthorizeRequest, ErrorNamespace, OAuthProblem};
use crate::state::AppState;

pub async fn authorize_get(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    run_authorize(&state, &Method::GET, None, &params)
}

pub async fn authorize_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(params): Form<HashMap<String, String>>,
) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    run_authorize(&state, &Method::POST, content_type, &params)
}

fn run_authorize(
    state: &AppState,
    method: &Method,
    content_type: Option<&str>,
    params: &HashMap<String, String>,
) -> Response {
    let request = AuthorizeRequest::new(params, method, content_type);

    match state.validator.validate(&request) {
        Ok(()) => {
            // Hand-off point: the grant pipeline (login, consent, code and
            // token minting) takes over from here.
            let accepted = AuthorizeAccepted {
                client_id: request.param(param::CLIENT_ID).unwrap_or_default().into(),
                response_type: request
                    .param(param::RESPONSE_TYPE)
                    .unwrap_or_default()
                    .into(),
                scope: request.param(param::SCOPE).unwrap_or_default().into(),
            };
            (StatusCode::OK, Json(accepted)).into_response()
        }
        Err(problem) => problem_response(params, &problem),
    }
}

/// Translate a validation failure into its client-facing delivery.
fn problem_response(params: &HashMap<String, String>, problem: &OAuthProblem) -> Response {
    if let Some(location) = params
        .get(param::REDIRECT_URI)
        .and_then(|uri| error_redirect(uri, problem))
    {
        return Redirect::to(location.as_str()).into_response();
    }

    let body = OAuthErrorBody {
        error: problem.code,
        error_description: problem.description.clone(),
    };
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

/// Build the error redirect, if `redirect_uri` is a usable absolute URL.
///
/// Code-response errors go in the query component; token-response errors in
/// the fragment, mirroring where the corresponding success payloads travel.
fn error_redirect(redirect_uri: &str, problem: &OAuthProblem) -> Option<Url> {
    let mut url = Url::parse(redirect_uri).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }

    match problem.namespace {
        ErrorNamespace::CodeResponse => {
            url.query_pairs_mut()
                .append_pair("error", problem.code)
                .append_pair("error_description", &problem.description);
        }
        ErrorNamespace::TokenResponse => {
            let fragment = url::form_urlencoded::Serializer::new(String::new())
                .append_pair("error", problem.code)
                .append_pair("error_description", &problem.description)
                .finish();
            url.set_fragment(Some(&fragment));
        }
    }
    Some(url)
}
