//! Service wiring: storage backends and the token service.

use std::sync::Arc;

use chrono::Duration;

use mebel_auth::Hs256TokenService;
use mebel_store::{
    CategoryStore, MemoryCategoryStore, MemoryProductStore, MemoryUserStore, PgCategoryStore,
    PgProductStore, PgUserStore, ProductStore, UserStore,
};

use crate::config::AppConfig;

/// Shared handles every handler works through.
///
/// The stores are trait objects so the same handler bodies serve both
/// backends; which backend gets built depends on whether `DATABASE_URL` is
/// configured.
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub products: Arc<dyn ProductStore>,
    pub categories: Arc<dyn CategoryStore>,
    pub tokens: Arc<Hs256TokenService>,
}

/// Build the service set from the configuration.
///
/// `DATABASE_URL` set: connect to Postgres and bootstrap the schema.
/// Unset: in-memory stores (dev/test); all data is lost on shutdown.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let tokens = Arc::new(Hs256TokenService::new(
        config.jwt_secret.as_bytes(),
        Duration::days(1),
    ));

    match config.database_url.as_deref() {
        Some(url) => {
            let pool = mebel_store::connect(url).await?;
            mebel_store::ensure_schema(&pool).await?;
            Ok(AppServices {
                users: Arc::new(PgUserStore::new(pool.clone())),
                products: Arc::new(PgProductStore::new(pool.clone())),
                categories: Arc::new(PgCategoryStore::new(pool)),
                tokens,
            })
        }
        None => {
            tracing::info!("DATABASE_URL not set, using in-memory stores");
            Ok(AppServices {
                users: Arc::new(MemoryUserStore::new()),
                products: Arc::new(MemoryProductStore::new()),
                categories: Arc::new(MemoryCategoryStore::new()),
                tokens,
            })
        }
    }
}
