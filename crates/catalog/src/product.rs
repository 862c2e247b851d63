//! Product records, their validation rules, and stock-status derivation.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mebel_core::{DomainError, DomainResult, ProductId};

/// Placeholder shown by clients when a product has no uploaded image.
pub const DEFAULT_IMAGE_URL: &str = "https://via.placeholder.com/300x200?text=No+Image";

// ─────────────────────────────────────────────────────────────────────────────
// Status Derivation
// ─────────────────────────────────────────────────────────────────────────────

/// Stock counts strictly below this (and above zero) are flagged as low.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Availability status, always derived from the stock count.
///
/// Callers never supply this value; every write path recomputes it via
/// [`derive_status`] before the record is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductStatus {
    Active,
    Low,
    Inactive,
}

impl core::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProductStatus::Active => f.write_str("Active"),
            ProductStatus::Low => f.write_str("Low"),
            ProductStatus::Inactive => f.write_str("Inactive"),
        }
    }
}

impl FromStr for ProductStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(ProductStatus::Active),
            "Low" => Ok(ProductStatus::Low),
            "Inactive" => Ok(ProductStatus::Inactive),
            other => Err(DomainError::validation(format!(
                "status must be one of: Active, Low, Inactive (got '{other}')"
            ))),
        }
    }
}

/// Map a stock count to its availability status.
///
/// Zero stock is `Inactive`, anything below [`LOW_STOCK_THRESHOLD`] is `Low`,
/// everything else is `Active`. Negative counts never reach this function;
/// validation rejects them first.
pub fn derive_status(stock: i64) -> ProductStatus {
    if stock == 0 {
        ProductStatus::Inactive
    } else if stock < LOW_STOCK_THRESHOLD {
        ProductStatus::Low
    } else {
        ProductStatus::Active
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Closed Vocabularies
// ─────────────────────────────────────────────────────────────────────────────

/// Furniture category a product belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCategory {
    Meja,
    Kursi,
    Lemari,
    Rak,
    Bufet,
    #[serde(rename = "Tempat Tidur")]
    TempatTidur,
}

impl ProductCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Meja => "Meja",
            ProductCategory::Kursi => "Kursi",
            ProductCategory::Lemari => "Lemari",
            ProductCategory::Rak => "Rak",
            ProductCategory::Bufet => "Bufet",
            ProductCategory::TempatTidur => "Tempat Tidur",
        }
    }
}

impl core::fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Meja" => Ok(ProductCategory::Meja),
            "Kursi" => Ok(ProductCategory::Kursi),
            "Lemari" => Ok(ProductCategory::Lemari),
            "Rak" => Ok(ProductCategory::Rak),
            "Bufet" => Ok(ProductCategory::Bufet),
            "Tempat Tidur" => Ok(ProductCategory::TempatTidur),
            other => Err(DomainError::validation(format!(
                "category must be one of: Meja, Kursi, Lemari, Rak, Bufet, Tempat Tidur (got '{other}')"
            ))),
        }
    }
}

/// Sales unit a product is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Unit {
    #[default]
    Unit,
    Set,
    Pcs,
}

impl core::fmt::Display for Unit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Unit::Unit => f.write_str("Unit"),
            Unit::Set => f.write_str("Set"),
            Unit::Pcs => f.write_str("Pcs"),
        }
    }
}

impl FromStr for Unit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Unit" => Ok(Unit::Unit),
            "Set" => Ok(Unit::Set),
            "Pcs" => Ok(Unit::Pcs),
            other => Err(DomainError::validation(format!(
                "unit must be one of: Unit, Set, Pcs (got '{other}')"
            ))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Product Record
// ─────────────────────────────────────────────────────────────────────────────

/// A catalog product.
///
/// # Invariants
/// - `status` is always `derive_status(stock)`; a caller-supplied status is
///   never trusted.
/// - `price`, `stock`, and `sold` are non-negative; `rating` stays in `0..=5`.
/// - `name` is unique across live records (case-insensitive); the store
///   enforces this as the final backstop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub unit: Unit,
    pub status: ProductStatus,
    pub image_url: String,
    pub rating: f64,
    pub sold: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a product. Status is derived, never accepted.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub category: ProductCategory,
    pub description: String,
    pub price: i64,
    pub stock: i64,
    pub unit: Option<Unit>,
    pub image_url: Option<String>,
}

/// Partial product update. `None` fields keep their current values.
///
/// There is deliberately no `status` field here: status follows stock.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub category: Option<ProductCategory>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub stock: Option<i64>,
    pub unit: Option<Unit>,
    pub image_url: Option<String>,
    pub rating: Option<f64>,
    pub sold: Option<i64>,
}

/// How a stock adjustment is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StockOperation {
    /// Add the quantity to the current stock.
    Add,
    /// Replace the current stock with the quantity.
    #[default]
    Set,
}

impl FromStr for StockOperation {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "add" => Ok(StockOperation::Add),
            "set" => Ok(StockOperation::Set),
            other => Err(DomainError::validation(format!(
                "operation must be one of: add, set (got '{other}')"
            ))),
        }
    }
}

impl Product {
    /// Validate input and build a new product with a derived status.
    pub fn create(id: ProductId, input: NewProduct, now: DateTime<Utc>) -> DomainResult<Self> {
        let name = require_field("name", &input.name)?;
        let description = require_field("description", &input.description)?;
        validate_non_negative("price", input.price)?;
        validate_non_negative("stock", input.stock)?;

        let image_url = match input.image_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => DEFAULT_IMAGE_URL.to_string(),
        };

        Ok(Self {
            id,
            name,
            category: input.category,
            description,
            price: input.price,
            stock: input.stock,
            unit: input.unit.unwrap_or_default(),
            status: derive_status(input.stock),
            image_url,
            rating: 0.0,
            sold: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply a partial update, then recompute the status from the (possibly
    /// unchanged) stock count.
    pub fn apply_update(&mut self, update: ProductUpdate, now: DateTime<Utc>) -> DomainResult<()> {
        if let Some(name) = update.name {
            self.name = require_field("name", &name)?;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = require_field("description", &description)?;
        }
        if let Some(price) = update.price {
            validate_non_negative("price", price)?;
            self.price = price;
        }
        if let Some(stock) = update.stock {
            validate_non_negative("stock", stock)?;
            self.stock = stock;
        }
        if let Some(unit) = update.unit {
            self.unit = unit;
        }
        if let Some(image_url) = update.image_url {
            let trimmed = image_url.trim();
            if trimmed.is_empty() {
                self.image_url = DEFAULT_IMAGE_URL.to_string();
            } else {
                self.image_url = trimmed.to_string();
            }
        }
        if let Some(rating) = update.rating {
            if !(0.0..=5.0).contains(&rating) {
                return Err(DomainError::validation("rating must be between 0 and 5"));
            }
            self.rating = rating;
        }
        if let Some(sold) = update.sold {
            validate_non_negative("sold", sold)?;
            self.sold = sold;
        }

        self.status = derive_status(self.stock);
        self.updated_at = now;
        Ok(())
    }

    /// Adjust the stock count and recompute the status in the same write.
    ///
    /// Both operations converge on the same derivation: `add` and `set` that
    /// land on the same count produce the same status.
    pub fn update_stock(
        &mut self,
        operation: StockOperation,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        validate_non_negative("stock", quantity)?;

        self.stock = match operation {
            StockOperation::Add => self
                .stock
                .checked_add(quantity)
                .ok_or_else(|| DomainError::validation("stock quantity is too large"))?,
            StockOperation::Set => quantity,
        };
        self.status = derive_status(self.stock);
        self.updated_at = now;
        Ok(())
    }

    /// Soft delete: zero the stock, which cascades to `Inactive` status. The
    /// record stays in the store.
    pub fn soft_delete(&mut self, now: DateTime<Utc>) {
        self.stock = 0;
        self.status = derive_status(self.stock);
        self.updated_at = now;
    }

    pub fn is_active(&self) -> bool {
        self.status == ProductStatus::Active
    }
}

fn require_field(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

fn validate_non_negative(field: &str, value: i64) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
