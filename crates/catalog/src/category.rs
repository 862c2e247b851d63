//! Category records and their validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mebel_core::{CategoryId, DomainError, DomainResult};

/// Default Bootstrap icon class for categories created without one.
pub const DEFAULT_ICON: &str = "bi-box-seam";

/// Default accent color for categories created without one.
pub const DEFAULT_COLOR: &str = "#ff7b00";

/// Canonical form of a category name: trimmed and lowercased.
///
/// Names are compared case-insensitively everywhere (uniqueness, product
/// counting), so the record itself only ever holds the canonical form.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// A product category.
///
/// # Invariants
/// - `name` is canonical (see [`normalize_name`]) and unique across live
///   records; the store enforces uniqueness as the final backstop.
/// - `product_count` is a cached tally, not a source of truth; it is
///   recomputed from the product store when the category is created or
///   renamed, and goes stale between those points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub product_count: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
}

/// Partial category update. `None` fields keep their current values.
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl Category {
    /// Validate input and build a new category with a canonical name.
    pub fn create(id: CategoryId, input: NewCategory, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = normalize_name(&input.name);
        if name.is_empty() {
            return Err(DomainError::validation("name is required"));
        }

        Ok(Self {
            id,
            name,
            description: input
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            icon: non_blank_or(input.icon, DEFAULT_ICON),
            color: non_blank_or(input.color, DEFAULT_COLOR),
            product_count: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, normalizing the name if one is given.
    pub fn apply_update(&mut self, update: CategoryUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = update.name {
            let name = normalize_name(&name);
            if name.is_empty() {
                return Err(DomainError::validation("name is required"));
            }
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(icon) = update.icon {
            self.icon = non_blank_or(Some(icon), DEFAULT_ICON);
        }
        if let Some(color) = update.color {
            self.color = non_blank_or(Some(color), DEFAULT_COLOR);
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }

        self.updated_at = now;
        Ok(())
    }

    /// Overwrite the cached product tally with a fresh count from the store.
    pub fn set_product_count(&mut self, count: i64, now: DateTime<Utc>) {
        self.product_count = count;
        self.updated_at = now;
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => default.to_string(),
    }
}
