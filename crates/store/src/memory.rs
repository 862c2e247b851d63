//! In-memory store implementations.
//!
//! Intended for tests/dev. Not optimized for performance. Uniqueness checks
//! run while the write lock is held, so concurrent writers cannot slip a
//! duplicate past them.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use mebel_auth::UserAccount;
use mebel_catalog::{Category, Product};
use mebel_core::{CategoryId, ProductId, UserId};

use crate::error::{StoreError, StoreResult};
use crate::query::{self, ProductQuery};
use crate::traits::{CategoryStore, ProductStore, UserStore};

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

fn eq_ci(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

// ─────────────────────────────────────────────────────────────────────────────
// Users
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, UserAccount>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_user_uniqueness(
    users: &HashMap<UserId, UserAccount>,
    candidate: &UserAccount,
) -> StoreResult<()> {
    for existing in users.values() {
        if existing.id == candidate.id {
            continue;
        }
        if eq_ci(&existing.username, &candidate.username) {
            return Err(StoreError::Duplicate { field: "username" });
        }
        if eq_ci(&existing.email, &candidate.email) {
            return Err(StoreError::Duplicate { field: "email" });
        }
    }
    Ok(())
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: UserAccount) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        check_user_uniqueness(&users, &user)?;
        users.insert(user.id, user);
        Ok(())
    }

    async fn update(&self, user: UserAccount) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        check_user_uniqueness(&users, &user)?;
        users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<UserAccount>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> StoreResult<Option<UserAccount>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users
            .values()
            .find(|u| eq_ci(&u.username, username))
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<UserAccount>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.values().find(|u| eq_ci(&u.email, email)).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<UserAccount>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        let mut all: Vec<UserAccount> = users.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, id: UserId) -> StoreResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Products
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<HashMap<ProductId, Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_product_uniqueness(
    products: &HashMap<ProductId, Product>,
    candidate: &Product,
) -> StoreResult<()> {
    for existing in products.values() {
        if existing.id == candidate.id {
            continue;
        }
        if eq_ci(&existing.name, &candidate.name) {
            return Err(StoreError::Duplicate { field: "name" });
        }
    }
    Ok(())
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: Product) -> StoreResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        check_product_uniqueness(&products, &product)?;
        products.insert(product.id, product);
        Ok(())
    }

    async fn update(&self, product: Product) -> StoreResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        if !products.contains_key(&product.id) {
            return Err(StoreError::NotFound);
        }
        check_product_uniqueness(&products, &product)?;
        products.insert(product.id, product);
        Ok(())
    }

    async fn find_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Product>> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.values().find(|p| eq_ci(&p.name, name)).cloned())
    }

    async fn list(&self, query: &ProductQuery) -> StoreResult<Vec<Product>> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(query::apply(query, products.values().cloned().collect()))
    }

    async fn delete(&self, id: ProductId) -> StoreResult<()> {
        let mut products = self.products.write().map_err(|_| poisoned())?;
        products.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }

    async fn count_in_category(&self, category: &str) -> StoreResult<i64> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products
            .values()
            .filter(|p| eq_ci(p.category.as_str(), category))
            .count() as i64)
    }

    async fn count_all(&self) -> StoreResult<i64> {
        let products = self.products.read().map_err(|_| poisoned())?;
        Ok(products.len() as i64)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Categories
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemoryCategoryStore {
    categories: RwLock<HashMap<CategoryId, Category>>,
}

impl MemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn check_category_uniqueness(
    categories: &HashMap<CategoryId, Category>,
    candidate: &Category,
) -> StoreResult<()> {
    for existing in categories.values() {
        if existing.id == candidate.id {
            continue;
        }
        if eq_ci(&existing.name, &candidate.name) {
            return Err(StoreError::Duplicate { field: "name" });
        }
    }
    Ok(())
}

#[async_trait]
impl CategoryStore for MemoryCategoryStore {
    async fn insert(&self, category: Category) -> StoreResult<()> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        check_category_uniqueness(&categories, &category)?;
        categories.insert(category.id, category);
        Ok(())
    }

    async fn update(&self, category: Category) -> StoreResult<()> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        if !categories.contains_key(&category.id) {
            return Err(StoreError::NotFound);
        }
        check_category_uniqueness(&categories, &category)?;
        categories.insert(category.id, category);
        Ok(())
    }

    async fn find_by_id(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<Option<Category>> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        Ok(categories
            .values()
            .find(|c| eq_ci(&c.name, name))
            .cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Category>> {
        let categories = self.categories.read().map_err(|_| poisoned())?;
        let mut all: Vec<Category> = categories.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(all)
    }

    async fn delete(&self, id: CategoryId) -> StoreResult<()> {
        let mut categories = self.categories.write().map_err(|_| poisoned())?;
        categories
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};

    use mebel_auth::{NewUser, Role, UserStatus};
    use mebel_catalog::{CategoryUpdate, NewCategory, NewProduct, ProductCategory};

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
    }

    fn user(username: &str, email: &str) -> UserAccount {
        UserAccount::create(
            NewUser {
                name: format!("{username} name"),
                username: username.to_string(),
                password_hash: "$2b$04$not-a-real-hash".to_string(),
                email: email.to_string(),
                phone: "081234567890".to_string(),
                image_url: None,
                role: Some(Role::User),
                status: Some(UserStatus::Active),
            },
            now(),
        )
        .unwrap()
    }

    fn product(name: &str, category: ProductCategory) -> Product {
        Product::create(
            ProductId::new(),
            NewProduct {
                name: name.to_string(),
                category,
                description: format!("{name} kayu jati"),
                price: 1_000_000,
                stock: 5,
                unit: None,
                image_url: None,
            },
            now(),
        )
        .unwrap()
    }

    fn category(name: &str) -> Category {
        category_at(name, now())
    }

    fn category_at(name: &str, created: DateTime<Utc>) -> Category {
        Category::create(
            CategoryId::new(),
            NewCategory {
                name: name.to_string(),
                description: None,
                icon: None,
                color: None,
            },
            created,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn username_uniqueness_ignores_case() {
        let store = MemoryUserStore::new();
        store.insert(user("admin", "admin@mebel.id")).await.unwrap();

        let result = store.insert(user("Admin", "other@mebel.id")).await;
        let Err(StoreError::Duplicate { field }) = result else {
            panic!("case-variant username must be rejected");
        };
        assert_eq!(field, "username");
    }

    #[tokio::test]
    async fn email_uniqueness_ignores_case() {
        let store = MemoryUserStore::new();
        store.insert(user("admin", "admin@mebel.id")).await.unwrap();

        let result = store.insert(user("other", "ADMIN@mebel.id")).await;
        let Err(StoreError::Duplicate { field }) = result else {
            panic!("case-variant email must be rejected");
        };
        assert_eq!(field, "email");
    }

    #[tokio::test]
    async fn update_does_not_conflict_with_its_own_record() {
        let store = MemoryUserStore::new();
        let mut account = user("johndoe", "john@mebel.id");
        store.insert(account.clone()).await.unwrap();

        account.name = "John D.".to_string();
        store.update(account.clone()).await.unwrap();

        let stored = store.find_by_id(account.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "John D.");
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_records() {
        let store = MemoryUserStore::new();
        let account = user("ghost", "ghost@mebel.id");

        assert!(matches!(
            store.update(account.clone()).await,
            Err(StoreError::NotFound)
        ));
        assert!(matches!(
            store.delete(account.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn username_lookup_ignores_case() {
        let store = MemoryUserStore::new();
        store
            .insert(user("JohnDoe", "john@mebel.id"))
            .await
            .unwrap();

        let found = store.find_by_username("johndoe").await.unwrap();
        assert!(found.is_some());
        assert_eq!(found.unwrap().username, "JohnDoe");
    }

    #[tokio::test]
    async fn product_names_are_unique_case_insensitively() {
        let store = MemoryProductStore::new();
        store
            .insert(product("Meja Makan Jati", ProductCategory::Meja))
            .await
            .unwrap();

        let result = store
            .insert(product("MEJA MAKAN JATI", ProductCategory::Meja))
            .await;
        assert!(matches!(
            result,
            Err(StoreError::Duplicate { field: "name" })
        ));
    }

    #[tokio::test]
    async fn category_counts_match_case_insensitively() {
        let store = MemoryProductStore::new();
        store
            .insert(product("Meja Makan", ProductCategory::Meja))
            .await
            .unwrap();
        store
            .insert(product("Meja Kerja", ProductCategory::Meja))
            .await
            .unwrap();
        store
            .insert(product("Kursi Tamu", ProductCategory::Kursi))
            .await
            .unwrap();

        assert_eq!(store.count_in_category("meja").await.unwrap(), 2);
        assert_eq!(store.count_in_category("MEJA").await.unwrap(), 2);
        assert_eq!(store.count_in_category("rak").await.unwrap(), 0);
        assert_eq!(store.count_all().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn category_listing_is_newest_first() {
        let store = MemoryCategoryStore::new();
        for (minute, name) in [(0, "rak"), (1, "bufet"), (2, "meja")] {
            let created = Utc.with_ymd_and_hms(2025, 6, 1, 9, minute, 0).unwrap();
            store.insert(category_at(name, created)).await.unwrap();
        }

        let names: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["meja", "bufet", "rak"]);
    }

    #[tokio::test]
    async fn renaming_a_category_onto_an_existing_name_is_rejected() {
        let store = MemoryCategoryStore::new();
        store.insert(category("meja")).await.unwrap();
        let mut second = category("kursi");
        store.insert(second.clone()).await.unwrap();

        let update = CategoryUpdate {
            name: Some("Meja".to_string()),
            ..CategoryUpdate::default()
        };
        second.apply_update(update, now()).unwrap();

        assert!(matches!(
            store.update(second).await,
            Err(StoreError::Duplicate { field: "name" })
        ));
    }
}
