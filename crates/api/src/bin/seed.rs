//! One-shot demo fixture loader for a Postgres deployment.
//!
//! The server already seeds in-memory stores itself when `MEBEL_SEED_DEMO=1`,
//! so this binary only makes sense against a database that outlives the
//! process. Running it twice is safe: fixtures that already exist are skipped.

use mebel_api::app::{seed, services};
use mebel_api::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mebel_observability::init();

    let config = AppConfig::from_env();
    if config.database_url.is_none() {
        anyhow::bail!("DATABASE_URL must be set; without it there is no store to seed");
    }

    let services = services::build_services(&config).await?;
    seed::seed_demo_data(&services).await?;

    tracing::info!("demo fixtures loaded");
    Ok(())
}
