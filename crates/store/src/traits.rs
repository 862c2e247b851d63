//! Storage traits for the three record collections.
//!
//! Handlers hold these as `Arc<dyn ...>` so the same request pipeline runs
//! against either backend. Every method returns [`StoreResult`]; `update` and
//! `delete` report a missing target as [`StoreError::NotFound`] rather than
//! succeeding silently.
//!
//! [`StoreError::NotFound`]: crate::StoreError::NotFound

use async_trait::async_trait;

use mebel_auth::UserAccount;
use mebel_catalog::{Category, Product};
use mebel_core::{CategoryId, ProductId, UserId};

use crate::error::StoreResult;
use crate::query::ProductQuery;

/// Storage for user accounts.
///
/// `username` and `email` are unique case-insensitively across live records;
/// a violating insert or update fails with `Duplicate`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert(&self, user: UserAccount) -> StoreResult<()>;

    /// Replace the stored record with the given one, matched by id.
    async fn update(&self, user: UserAccount) -> StoreResult<()>;

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserAccount>>;

    /// Case-insensitive username lookup.
    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserAccount>>;

    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>>;

    /// All accounts, newest first.
    async fn list(&self) -> StoreResult<Vec<UserAccount>>;

    /// Hard delete. The record is gone afterwards.
    async fn delete(&self, id: UserId) -> StoreResult<()>;
}

/// Storage for catalog products.
///
/// `name` is unique case-insensitively across live records.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: Product) -> StoreResult<()>;

    async fn update(&self, product: Product) -> StoreResult<()>;

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Case-insensitive name lookup.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>>;

    /// Filtered and sorted listing; see [`ProductQuery`].
    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>>;

    async fn delete(&self, id: ProductId) -> StoreResult<()>;

    /// Number of products whose category matches the given name,
    /// case-insensitively.
    async fn count_in_category(&self, category: &str) -> StoreResult<i64>;

    async fn count_all(&self) -> StoreResult<i64>;
}

/// Storage for product categories.
///
/// `name` is unique case-insensitively across live records (names are stored
/// in canonical lowercase form, so the backstop rarely fires in practice).
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert(&self, category: Category) -> StoreResult<()>;

    async fn update(&self, category: Category) -> StoreResult<()>;

    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    /// Case-insensitive name lookup.
    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>>;

    /// All categories, newest first.
    async fn list(&self) -> StoreResult<Vec<Category>>;

    async fn delete(&self, id: CategoryId) -> StoreResult<()>;
}
