//! Wire-format request bodies and JSON mapping helpers.
//!
//! Request fields are all optional at the serde level; handlers check
//! presence themselves so a missing field yields a 400 with a field-specific
//! message instead of a generic deserialization error. Unknown body fields
//! (notably a client-supplied product `status`) are silently dropped.

use serde::Deserialize;

use mebel_auth::UserAccount;
use mebel_catalog::{Category, Product};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetUserStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub unit: Option<String>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub sold: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub stock: Option<i64>,
    pub operation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// The password hash never leaves the server.
pub fn user_to_json(account: &UserAccount) -> serde_json::Value {
    serde_json::json!({
        "id": account.id.to_string(),
        "name": account.name,
        "username": account.username,
        "email": account.email,
        "phone": account.phone,
        "imageUrl": account.image_url,
        "role": account.role.to_string(),
        "status": account.status.to_string(),
        "createdAt": account.created_at.to_rfc3339(),
        "updatedAt": account.updated_at.to_rfc3339(),
    })
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    serde_json::json!({
        "id": product.id.to_string(),
        "name": product.name,
        "category": product.category.to_string(),
        "description": product.description,
        "price": product.price,
        "stock": product.stock,
        "unit": product.unit.to_string(),
        "status": product.status.to_string(),
        "imageUrl": product.image_url,
        "rating": product.rating,
        "sold": product.sold,
        "createdAt": product.created_at.to_rfc3339(),
        "updatedAt": product.updated_at.to_rfc3339(),
    })
}

pub fn category_to_json(category: &Category) -> serde_json::Value {
    serde_json::json!({
        "id": category.id.to_string(),
        "name": category.name,
        "description": category.description,
        "icon": category.icon,
        "color": category.color,
        "productCount": category.product_count,
        "isActive": category.is_active,
        "createdAt": category.created_at.to_rfc3339(),
        "updatedAt": category.updated_at.to_rfc3339(),
    })
}
