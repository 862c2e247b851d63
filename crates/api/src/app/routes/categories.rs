//! Category endpoints.
//!
//! Reads are public; mutations are admin-only. Category names are canonical
//! (trimmed, lowercased) on every write, and the cached product count is
//! refreshed whenever the name is set.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;

use mebel_auth::{Principal, require_admin};
use mebel_catalog::{Category, CategoryUpdate, NewCategory, normalize_name};
use mebel_core::CategoryId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    let public = Router::new()
        .route("/", get(list_categories))
        .route("/stats", get(category_stats))
        .route("/:id", get(get_category));

    let protected = Router::new()
        .route("/", post(create_category))
        .route("/:id", put(update_category).delete(delete_category))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    public.merge(protected)
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.categories.list().await {
        Ok(categories) => {
            let items = categories.iter().map(dto::category_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let category_id = match errors::parse_category_id(&id) {
        Ok(category_id) => category_id,
        Err(response) => return response,
    };

    match services.categories.find_by_id(category_id).await {
        Ok(Some(category)) => {
            (StatusCode::OK, Json(dto::category_to_json(&category))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn category_stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let categories = match services.categories.list().await {
        Ok(categories) => categories,
        Err(e) => return errors::store_error_to_response(e),
    };
    let total_products = match services.products.count_all().await {
        Ok(total) => total,
        Err(e) => return errors::store_error_to_response(e),
    };

    let summaries = categories
        .iter()
        .map(|c| {
            serde_json::json!({
                "id": c.id.to_string(),
                "name": c.name,
                "productCount": c.product_count,
            })
        })
        .collect::<Vec<_>>();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "totalCategories": categories.len(),
            "totalProducts": total_products,
            "categories": summaries,
        })),
    )
        .into_response()
}

pub async fn create_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateCategoryRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let Some(raw_name) = body.name else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "name is required");
    };
    let name = normalize_name(&raw_name);
    if name.is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "name is required");
    }

    match services.categories.find_by_name(&name).await {
        Ok(Some(_)) => {
            return errors::json_error(StatusCode::CONFLICT, "conflict", "category already exists");
        }
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    let mut category = match Category::create(
        CategoryId::new(),
        NewCategory {
            name: raw_name,
            description: body.description,
            icon: body.icon,
            color: body.color,
        },
        Utc::now(),
    ) {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Products may already reference this name; start the tally from them.
    let count = match services.products.count_in_category(&category.name).await {
        Ok(count) => count,
        Err(e) => return errors::store_error_to_response(e),
    };
    category.set_product_count(count, Utc::now());

    let data = dto::category_to_json(&category);
    if let Err(e) = services.categories.insert(category).await {
        return errors::store_error_to_response(e);
    }
    tracing::info!(%name, "category created");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Category created successfully", "data": data})),
    )
        .into_response()
}

pub async fn update_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCategoryRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let category_id = match errors::parse_category_id(&id) {
        Ok(category_id) => category_id,
        Err(response) => return response,
    };

    let mut category = match services.categories.find_by_id(category_id).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some(new_name) = body.name.as_deref() {
        let normalized = normalize_name(new_name);
        match services.categories.find_by_name(&normalized).await {
            Ok(Some(existing)) if existing.id != category_id => {
                return errors::json_error(
                    StatusCode::CONFLICT,
                    "conflict",
                    "category name is already in use",
                );
            }
            Ok(_) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }

    let renamed = body.name.is_some();
    let update = CategoryUpdate {
        name: body.name,
        description: body.description,
        icon: body.icon,
        color: body.color,
        is_active: body.is_active,
    };
    if let Err(e) = category.apply_update(update, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    // The cached tally follows the name.
    if renamed {
        let count = match services.products.count_in_category(&category.name).await {
            Ok(count) => count,
            Err(e) => return errors::store_error_to_response(e),
        };
        category.set_product_count(count, Utc::now());
    }

    let data = dto::category_to_json(&category);
    if let Err(e) = services.categories.update(category).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "Category updated successfully", "data": data})),
    )
        .into_response()
}

/// Deletion is refused while any product still references the category.
pub async fn delete_category(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let category_id = match errors::parse_category_id(&id) {
        Ok(category_id) => category_id,
        Err(response) => return response,
    };

    let category = match services.categories.find_by_id(category_id).await {
        Ok(Some(category)) => category,
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "category not found");
        }
        Err(e) => return errors::store_error_to_response(e),
    };

    let count = match services.products.count_in_category(&category.name).await {
        Ok(count) => count,
        Err(e) => return errors::store_error_to_response(e),
    };
    if count > 0 {
        return errors::json_error(
            StatusCode::CONFLICT,
            "conflict",
            format!("cannot delete a category that still has {count} products"),
        );
    }

    match services.categories.delete(category_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "Category deleted successfully"})),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
