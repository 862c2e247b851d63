//! Login, password, and account-administration endpoints.
//!
//! Login deliberately answers "Invalid username or password" for both an
//! unknown username and a wrong password, and checks account status before
//! the password so the inactive-account outcome is independent of password
//! correctness.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use chrono::Utc;

use mebel_auth::{
    NewUser, Principal, Role, UserAccount, UserStatus, UserUpdate, hash_password,
    require_admin, require_self_or_admin, verify_password,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    let public = Router::new().route("/login", post(login));

    let protected = Router::new()
        .route("/change-password", post(change_password))
        .route("/add-user", post(add_user))
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(soft_delete_user))
        .route("/users/:id/status", patch(set_user_status))
        .route("/users/:id/hard", delete(hard_delete_user))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    public.merge(protected)
}

fn invalid_credentials() -> axum::response::Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "invalid_credentials",
        "Invalid username or password",
    )
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::LoginRequest>,
) -> axum::response::Response {
    let (Some(username), Some(password)) = (body.username, body.password) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username and password are required",
        );
    };

    let account = match services.users.find_by_username(&username).await {
        Ok(Some(account)) => account,
        Ok(None) => return invalid_credentials(),
        Err(e) => return errors::store_error_to_response(e),
    };

    if !account.is_active() {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "account_inactive",
            "account is inactive, contact an administrator",
        );
    }

    match verify_password(&password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials(),
        Err(e) => return errors::password_error_to_response(e),
    }

    let token = match services
        .tokens
        .issue(account.id, &account.username, account.role, Utc::now())
    {
        Ok(token) => token,
        Err(e) => return errors::token_error_to_response(&e),
    };

    tracing::info!(username = %account.username, "login succeeded");
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "message": "Login successful",
            "token": token,
            "username": account.username,
            "name": account.name,
            "role": account.role.to_string(),
        })),
    )
        .into_response()
}

pub async fn change_password(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::ChangePasswordRequest>,
) -> axum::response::Response {
    let (Some(old_password), Some(new_password)) = (body.old_password, body.new_password) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "oldPassword and newPassword are required",
        );
    };
    if new_password.trim().is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "new password must not be empty",
        );
    }

    let mut account = match services.users.find_by_id(principal.user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    match verify_password(&old_password, &account.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_old_password",
                "old password is incorrect",
            );
        }
        Err(e) => return errors::password_error_to_response(e),
    }

    let hash = match hash_password(&new_password) {
        Ok(hash) => hash,
        Err(e) => return errors::password_error_to_response(e),
    };
    account.set_password_hash(hash, Utc::now());

    if let Err(e) = services.users.update(account).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "Password changed successfully"})),
    )
        .into_response()
}

pub async fn add_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::AddUserRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let (Some(name), Some(username), Some(password), Some(email), Some(phone)) =
        (body.name, body.username, body.password, body.email, body.phone)
    else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "name, username, password, email, and phone are required",
        );
    };
    if password.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "password is required");
    }

    let role = match body.role.as_deref().map(str::parse::<Role>).transpose() {
        Ok(role) => role,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let status = match body.status.as_deref().map(str::parse::<UserStatus>).transpose() {
        Ok(status) => status,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.users.find_by_username(&username).await {
        Ok(Some(_)) => {
            return errors::json_error(StatusCode::CONFLICT, "conflict", "username is already taken");
        }
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }
    match services.users.find_by_email(&email).await {
        Ok(Some(_)) => {
            return errors::json_error(StatusCode::CONFLICT, "conflict", "email is already registered");
        }
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    // Hash last: bcrypt is the expensive step.
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => return errors::password_error_to_response(e),
    };

    let account = match UserAccount::create(
        NewUser {
            name,
            username,
            password_hash,
            email,
            phone,
            image_url: body.image_url,
            role,
            status,
        },
        Utc::now(),
    ) {
        Ok(account) => account,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let user = dto::user_to_json(&account);
    let username = account.username.clone();
    if let Err(e) = services.users.insert(account).await {
        return errors::store_error_to_response(e);
    }
    tracing::info!(%username, "user registered");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "User registered successfully", "user": user})),
    )
        .into_response()
}

pub async fn list_users(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    match services.users.list().await {
        Ok(accounts) => {
            let users = accounts.iter().map(dto::user_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(users)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn update_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateUserRequest>,
) -> axum::response::Response {
    let user_id = match errors::parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    if let Err(e) = require_self_or_admin(&principal, user_id) {
        return errors::authz_error_to_response(e);
    }

    let role = match body.role.as_deref().map(str::parse::<Role>).transpose() {
        Ok(role) => role,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let status = match body.status.as_deref().map(str::parse::<UserStatus>).transpose() {
        Ok(status) => status,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let update = UserUpdate {
        name: body.name,
        username: body.username,
        email: body.email,
        phone: body.phone,
        image_url: body.image_url,
        role,
        status,
    };
    if update.touches_privileged_fields() && !principal.is_admin() {
        return errors::json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            "only administrators may change role or status",
        );
    }

    let mut account = match services.users.find_by_id(user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some(new_username) = update.username.as_deref() {
        match services.users.find_by_username(new_username).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return errors::json_error(
                    StatusCode::CONFLICT,
                    "conflict",
                    "username is already taken",
                );
            }
            Ok(_) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }
    if let Some(new_email) = update.email.as_deref() {
        match services.users.find_by_email(new_email).await {
            Ok(Some(existing)) if existing.id != user_id => {
                return errors::json_error(
                    StatusCode::CONFLICT,
                    "conflict",
                    "email is already registered",
                );
            }
            Ok(_) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }

    if let Err(e) = account.apply_update(update, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    let user = dto::user_to_json(&account);
    if let Err(e) = services.users.update(account).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "User updated successfully", "user": user})),
    )
        .into_response()
}

pub async fn set_user_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetUserStatusRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let user_id = match errors::parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let Some(raw_status) = body.status else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "status is required");
    };
    let status = match raw_status.parse::<UserStatus>() {
        Ok(status) => status,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut account = match services.users.find_by_id(user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    account.set_status(status, Utc::now());

    let user = dto::user_to_json(&account);
    if let Err(e) = services.users.update(account).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "User status updated successfully", "user": user})),
    )
        .into_response()
}

/// Soft delete: the account stays on record but can no longer log in.
pub async fn soft_delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let user_id = match errors::parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    let mut account = match services.users.find_by_id(user_id).await {
        Ok(Some(account)) => account,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "user not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    account.set_status(UserStatus::Inactive, Utc::now());

    let user = dto::user_to_json(&account);
    if let Err(e) = services.users.update(account).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "User deactivated successfully", "user": user})),
    )
        .into_response()
}

pub async fn hard_delete_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let user_id = match errors::parse_user_id(&id) {
        Ok(user_id) => user_id,
        Err(response) => return response,
    };

    match services.users.delete(user_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "User permanently deleted"})),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
