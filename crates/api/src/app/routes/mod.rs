use axum::Router;

use crate::middleware::AuthState;

pub mod auth;
pub mod categories;
pub mod products;
pub mod system;

/// Router for everything under `/api`.
///
/// Each area decides per route whether the token middleware applies, so the
/// state is handed down rather than layered here.
pub fn router(auth_state: AuthState) -> Router {
    Router::new()
        .nest("/auth", auth::router(auth_state.clone()))
        .nest("/products", products::router(auth_state.clone()))
        .nest("/categories", categories::router(auth_state))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Json;
    use axum::extract::Extension;
    use axum::http::StatusCode;
    use chrono::Duration;

    use mebel_auth::{Hs256TokenService, Principal, Role, UserAccount};
    use mebel_catalog::{Category, Product};
    use mebel_core::{CategoryId, ProductId, UserId};
    use mebel_store::{
        CategoryStore, MemoryCategoryStore, MemoryProductStore, MemoryUserStore, ProductQuery,
        ProductStore, StoreError, StoreResult, UserStore,
    };

    use crate::app::dto;
    use crate::app::services::AppServices;

    use super::{auth, categories, products};

    /// Captures the message of every event emitted on this thread.
    #[derive(Default)]
    struct LogRecorder {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl tracing::Subscriber for LogRecorder {
        fn enabled(&self, _metadata: &tracing::Metadata<'_>) -> bool {
            true
        }

        fn new_span(&self, _span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
            tracing::span::Id::from_u64(1)
        }

        fn record(&self, _span: &tracing::span::Id, _values: &tracing::span::Record<'_>) {}

        fn record_follows_from(&self, _span: &tracing::span::Id, _follows: &tracing::span::Id) {}

        fn event(&self, event: &tracing::Event<'_>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            if let Some(message) = visitor.0 {
                self.messages.lock().unwrap().push(message);
            }
        }

        fn enter(&self, _span: &tracing::span::Id) {}

        fn exit(&self, _span: &tracing::span::Id) {}
    }

    #[derive(Default)]
    struct MessageVisitor(Option<String>);

    impl tracing::field::Visit for MessageVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            if field.name() == "message" {
                self.0 = Some(format!("{value:?}"));
            }
        }
    }

    /// Store whose uniqueness backstop fires on every insert, the way a
    /// concurrent writer would make it fire after the handler's pre-check.
    struct RejectingUserStore;

    #[async_trait]
    impl UserStore for RejectingUserStore {
        async fn insert(&self, _user: UserAccount) -> StoreResult<()> {
            Err(StoreError::Duplicate { field: "username" })
        }

        async fn update(&self, _user: UserAccount) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }

        async fn find_by_id(&self, _id: UserId) -> StoreResult<Option<UserAccount>> {
            Ok(None)
        }

        async fn find_by_username(&self, _username: &str) -> StoreResult<Option<UserAccount>> {
            Ok(None)
        }

        async fn find_by_email(&self, _email: &str) -> StoreResult<Option<UserAccount>> {
            Ok(None)
        }

        async fn list(&self) -> StoreResult<Vec<UserAccount>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: UserId) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }
    }

    struct RejectingProductStore;

    #[async_trait]
    impl ProductStore for RejectingProductStore {
        async fn insert(&self, _product: Product) -> StoreResult<()> {
            Err(StoreError::Duplicate { field: "name" })
        }

        async fn update(&self, _product: Product) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }

        async fn find_by_id(&self, _id: ProductId) -> StoreResult<Option<Product>> {
            Ok(None)
        }

        async fn find_by_name(&self, _name: &str) -> StoreResult<Option<Product>> {
            Ok(None)
        }

        async fn list(&self, _query: &ProductQuery) -> StoreResult<Vec<Product>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: ProductId) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }

        async fn count_in_category(&self, _category: &str) -> StoreResult<i64> {
            Ok(0)
        }

        async fn count_all(&self) -> StoreResult<i64> {
            Ok(0)
        }
    }

    struct RejectingCategoryStore;

    #[async_trait]
    impl CategoryStore for RejectingCategoryStore {
        async fn insert(&self, _category: Category) -> StoreResult<()> {
            Err(StoreError::Duplicate { field: "name" })
        }

        async fn update(&self, _category: Category) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }

        async fn find_by_id(&self, _id: CategoryId) -> StoreResult<Option<Category>> {
            Ok(None)
        }

        async fn find_by_name(&self, _name: &str) -> StoreResult<Option<Category>> {
            Ok(None)
        }

        async fn list(&self) -> StoreResult<Vec<Category>> {
            Ok(Vec::new())
        }

        async fn delete(&self, _id: CategoryId) -> StoreResult<()> {
            Err(StoreError::NotFound)
        }
    }

    fn services_with(
        users: Arc<dyn UserStore>,
        products: Arc<dyn ProductStore>,
        categories: Arc<dyn CategoryStore>,
    ) -> Arc<AppServices> {
        Arc::new(AppServices {
            users,
            products,
            categories,
            tokens: Arc::new(Hs256TokenService::new(b"test-secret", Duration::days(1))),
        })
    }

    fn memory_services() -> Arc<AppServices> {
        services_with(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryProductStore::new()),
            Arc::new(MemoryCategoryStore::new()),
        )
    }

    fn admin() -> Principal {
        Principal {
            user_id: UserId::new(),
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    #[tokio::test]
    async fn add_user_logs_success_only_after_the_insert_lands() {
        let recorder = LogRecorder::default();
        let messages = Arc::clone(&recorder.messages);
        let _guard = tracing::subscriber::set_default(recorder);

        let body = || dto::AddUserRequest {
            name: Some("Jane Roe".to_string()),
            username: Some("janeroe".to_string()),
            password: Some("user123".to_string()),
            email: Some("jane@example.com".to_string()),
            phone: Some("081234567891".to_string()),
            image_url: None,
            role: None,
            status: None,
        };

        // Backstop rejection: 409, and no success line.
        let services = services_with(
            Arc::new(RejectingUserStore),
            Arc::new(MemoryProductStore::new()),
            Arc::new(MemoryCategoryStore::new()),
        );
        let response = auth::add_user(Extension(services), Extension(admin()), Json(body())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let logged: Vec<String> = messages.lock().unwrap().clone();
        assert!(
            !logged.iter().any(|m| m.contains("user registered")),
            "rejected insert must not log success: {logged:?}"
        );

        // Accepted insert logs it.
        let response =
            auth::add_user(Extension(memory_services()), Extension(admin()), Json(body())).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains("user registered"))
        );
    }

    #[tokio::test]
    async fn create_product_logs_success_only_after_the_insert_lands() {
        let recorder = LogRecorder::default();
        let messages = Arc::clone(&recorder.messages);
        let _guard = tracing::subscriber::set_default(recorder);

        let body = || dto::CreateProductRequest {
            name: Some("Meja Belajar Anak".to_string()),
            category: Some("Meja".to_string()),
            description: Some("Meja belajar kayu pinus".to_string()),
            price: Some(450_000),
            stock: Some(10),
            unit: None,
            image_url: None,
        };

        let services = services_with(
            Arc::new(MemoryUserStore::new()),
            Arc::new(RejectingProductStore),
            Arc::new(MemoryCategoryStore::new()),
        );
        let response =
            products::create_product(Extension(services), Extension(admin()), Json(body())).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(
            !messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains("product created"))
        );

        let response = products::create_product(
            Extension(memory_services()),
            Extension(admin()),
            Json(body()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains("product created"))
        );
    }

    #[tokio::test]
    async fn create_category_logs_success_only_after_the_insert_lands() {
        let recorder = LogRecorder::default();
        let messages = Arc::clone(&recorder.messages);
        let _guard = tracing::subscriber::set_default(recorder);

        let body = || dto::CreateCategoryRequest {
            name: Some("dekorasi".to_string()),
            description: None,
            icon: None,
            color: None,
        };

        let services = services_with(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryProductStore::new()),
            Arc::new(RejectingCategoryStore),
        );
        let response =
            categories::create_category(Extension(services), Extension(admin()), Json(body()))
                .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert!(
            !messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains("category created"))
        );

        let response = categories::create_category(
            Extension(memory_services()),
            Extension(admin()),
            Json(body()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert!(
            messages
                .lock()
                .unwrap()
                .iter()
                .any(|m| m.contains("category created"))
        );
    }
}
