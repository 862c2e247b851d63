//! Product catalog endpoints.
//!
//! Every route requires a valid token; reads accept any role, mutations are
//! admin-only. Stock-changing writes re-derive the availability status in the
//! same request, so the response already carries the new status.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
};
use chrono::Utc;

use mebel_auth::{Principal, require_admin};
use mebel_catalog::{NewProduct, Product, ProductCategory, ProductUpdate, StockOperation, Unit};
use mebel_core::ProductId;
use mebel_store::ProductQuery;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::middleware::{self, AuthState};

pub fn router(auth_state: AuthState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(soft_delete_product),
        )
        .route("/:id/stock", patch(update_stock))
        .route("/:id/hard", delete(hard_delete_product))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ))
}

fn build_query(params: dto::ProductListQuery) -> Result<ProductQuery, axum::response::Response> {
    let mut query = ProductQuery::default();
    if let Some(category) = params.category.as_deref() {
        query.category = Some(category.parse().map_err(errors::domain_error_to_response)?);
    }
    if let Some(status) = params.status.as_deref() {
        query.status = Some(status.parse().map_err(errors::domain_error_to_response)?);
    }
    query.search = params.search;
    if let Some(sort) = params.sort.as_deref() {
        query.sort = sort.parse().map_err(errors::domain_error_to_response)?;
    }
    if let Some(order) = params.order.as_deref() {
        query.order = order.parse().map_err(errors::domain_error_to_response)?;
    }
    Ok(query)
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::ProductListQuery>,
) -> axum::response::Response {
    let query = match build_query(params) {
        Ok(query) => query,
        Err(response) => return response,
    };

    match services.products.list(&query).await {
        Ok(products) => {
            let items = products.iter().map(dto::product_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let product_id = match errors::parse_product_id(&id) {
        Ok(product_id) => product_id,
        Err(response) => return response,
    };

    match services.products.find_by_id(product_id).await {
        Ok(Some(product)) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<dto::CreateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let (Some(name), Some(raw_category), Some(description), Some(price), Some(stock)) = (
        body.name,
        body.category,
        body.description,
        body.price,
        body.stock,
    ) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "name, category, description, price, and stock are required",
        );
    };

    let category = match raw_category.parse::<ProductCategory>() {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let unit = match body.unit.as_deref().map(str::parse::<Unit>).transpose() {
        Ok(unit) => unit,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.products.find_by_name(&name).await {
        Ok(Some(_)) => {
            return errors::json_error(
                StatusCode::CONFLICT,
                "conflict",
                "a product with this name already exists",
            );
        }
        Ok(None) => {}
        Err(e) => return errors::store_error_to_response(e),
    }

    let product = match Product::create(
        ProductId::new(),
        NewProduct {
            name,
            category,
            description,
            price,
            stock,
            unit,
            image_url: body.image_url,
        },
        Utc::now(),
    ) {
        Ok(product) => product,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let response = dto::product_to_json(&product);
    let name = product.name.clone();
    if let Err(e) = services.products.insert(product).await {
        return errors::store_error_to_response(e);
    }
    tracing::info!(%name, "product created");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({"message": "Product created successfully", "product": response})),
    )
        .into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateProductRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let product_id = match errors::parse_product_id(&id) {
        Ok(product_id) => product_id,
        Err(response) => return response,
    };

    let category = match body
        .category
        .as_deref()
        .map(str::parse::<ProductCategory>)
        .transpose()
    {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let unit = match body.unit.as_deref().map(str::parse::<Unit>).transpose() {
        Ok(unit) => unit,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let update = ProductUpdate {
        name: body.name,
        category,
        description: body.description,
        price: body.price,
        stock: body.stock,
        unit,
        image_url: body.image_url,
        rating: body.rating,
        sold: body.sold,
    };

    let mut product = match services.products.find_by_id(product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Some(new_name) = update.name.as_deref() {
        match services.products.find_by_name(new_name).await {
            Ok(Some(existing)) if existing.id != product_id => {
                return errors::json_error(
                    StatusCode::CONFLICT,
                    "conflict",
                    "a product with this name already exists",
                );
            }
            Ok(_) => {}
            Err(e) => return errors::store_error_to_response(e),
        }
    }

    if let Err(e) = product.apply_update(update, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    let response = dto::product_to_json(&product);
    if let Err(e) = services.products.update(product).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "Product updated successfully", "product": response})),
    )
        .into_response()
}

pub async fn update_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateStockRequest>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let product_id = match errors::parse_product_id(&id) {
        Ok(product_id) => product_id,
        Err(response) => return response,
    };

    let Some(stock) = body.stock else {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "stock is required");
    };
    let operation = match body
        .operation
        .as_deref()
        .map(str::parse::<StockOperation>)
        .transpose()
    {
        Ok(operation) => operation.unwrap_or_default(),
        Err(e) => return errors::domain_error_to_response(e),
    };

    let mut product = match services.products.find_by_id(product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    if let Err(e) = product.update_stock(operation, stock, Utc::now()) {
        return errors::domain_error_to_response(e);
    }

    let response = dto::product_to_json(&product);
    if let Err(e) = services.products.update(product).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "Stock updated successfully", "product": response})),
    )
        .into_response()
}

/// Soft delete: zero the stock so the status cascades to Inactive; the
/// record remains listable.
pub async fn soft_delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let product_id = match errors::parse_product_id(&id) {
        Ok(product_id) => product_id,
        Err(response) => return response,
    };

    let mut product = match services.products.find_by_id(product_id).await {
        Ok(Some(product)) => product,
        Ok(None) => return errors::json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        Err(e) => return errors::store_error_to_response(e),
    };

    product.soft_delete(Utc::now());

    let response = dto::product_to_json(&product);
    if let Err(e) = services.products.update(product).await {
        return errors::store_error_to_response(e);
    }

    (
        StatusCode::OK,
        Json(serde_json::json!({"message": "Product deleted successfully", "product": response})),
    )
        .into_response()
}

pub async fn hard_delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = require_admin(&principal) {
        return errors::authz_error_to_response(e);
    }

    let product_id = match errors::parse_product_id(&id) {
        Ok(product_id) => product_id,
        Err(response) => return response,
    };

    match services.products.delete(product_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({"message": "Product permanently deleted"})),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
