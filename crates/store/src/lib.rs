//! Persistence boundary for the catalog backend.
//!
//! This crate defines storage traits for users, products, and categories
//! without making any storage assumptions, plus two implementations: an
//! in-memory store for tests/dev and a Postgres-backed store for deployment.
//!
//! Uniqueness rules (case-insensitive usernames, emails, and names) are
//! checked by the write paths before mutating, and enforced a second time by
//! each backend as the final backstop: the in-memory store scans under its
//! write lock, Postgres uses unique expression indexes.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod query;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{MemoryCategoryStore, MemoryProductStore, MemoryUserStore};
pub use postgres::{PgCategoryStore, PgProductStore, PgUserStore, connect, ensure_schema};
pub use query::{ProductQuery, ProductSortField, SortOrder};
pub use traits::{CategoryStore, ProductStore, UserStore};
