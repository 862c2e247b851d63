//! Consistent JSON error responses.
//!
//! The 401/403 split is deliberate and preserved everywhere: authentication
//! failures (no/bad/expired token) are 401 and mean "re-authenticate";
//! authorization failures (valid identity, wrong role or ownership) are 403
//! and mean "access denied".

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use mebel_auth::{AuthzError, PasswordError, TokenError};
use mebel_core::{CategoryId, DomainError, ProductId, UserId};
use mebel_store::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Duplicate { .. } => json_error(StatusCode::CONFLICT, "conflict", err.to_string()),
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::Backend(msg) => {
            tracing::error!(error = %msg, "storage backend failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", msg)
        }
    }
}

pub fn token_error_to_response(err: &TokenError) -> axum::response::Response {
    match err {
        TokenError::Expired => json_error(
            StatusCode::UNAUTHORIZED,
            "token_expired",
            "token has expired, please login again",
        ),
        TokenError::InvalidSignature => json_error(
            StatusCode::UNAUTHORIZED,
            "token_invalid",
            "token signature is invalid",
        ),
        TokenError::Malformed => json_error(
            StatusCode::UNAUTHORIZED,
            "token_malformed",
            "token is malformed",
        ),
        TokenError::Signing(msg) => {
            tracing::error!(error = %msg, "token signing failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "token_error", "failed to issue token")
        }
    }
}

pub fn authz_error_to_response(err: AuthzError) -> axum::response::Response {
    match err {
        AuthzError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
    }
}

pub fn password_error_to_response(err: PasswordError) -> axum::response::Response {
    tracing::error!(error = %err, "password hashing failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "hash_error",
        "password hashing failed",
    )
}

pub fn parse_user_id(raw: &str) -> Result<UserId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid user id"))
}

pub fn parse_product_id(raw: &str) -> Result<ProductId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid product id"))
}

pub fn parse_category_id(raw: &str) -> Result<CategoryId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid category id"))
}
