use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use mebel_auth::{Principal, TokenVerifier};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<dyn TokenVerifier>,
}

/// Bearer-token gate for protected routes.
///
/// On success the verified [`Principal`] is inserted into request extensions
/// for handlers to pick up. Every failure here is a 401 with a per-cause
/// code; role checks (403) live in the handlers, never in this layer.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_bearer(req.headers()) {
        Ok(token) => token,
        Err(response) => return response,
    };

    let claims = match state.tokens.verify(token, Utc::now()) {
        Ok(claims) => claims,
        Err(e) => return errors::token_error_to_response(&e),
    };

    let principal = match Principal::from_claims(&claims) {
        Ok(principal) => principal,
        Err(e) => return errors::token_error_to_response(&e),
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let missing = || {
        errors::json_error(
            StatusCode::UNAUTHORIZED,
            "missing_token",
            "missing bearer token, please login first",
        )
    };

    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(missing)?;

    let header = header.to_str().map_err(|_| missing())?;

    let header = header.strip_prefix("Bearer ").ok_or_else(missing)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(missing());
    }

    Ok(token)
}
