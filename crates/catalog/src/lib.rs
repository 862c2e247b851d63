//! Catalog domain module.
//!
//! This crate contains business rules for products and categories, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). The one
//! rule everything else hangs off is stock-status derivation: a product's
//! availability status is computed from its stock count and is never accepted
//! from callers.

pub mod category;
pub mod product;

pub use category::{Category, CategoryUpdate, NewCategory, normalize_name};
pub use product::{
    LOW_STOCK_THRESHOLD, NewProduct, Product, ProductCategory, ProductStatus, ProductUpdate,
    StockOperation, Unit, derive_status,
};
