//! HTTP API application wiring (axum router + service wiring).
//!
//! This folder is structured like:
//! - `services.rs`: storage backends and the token service
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses
//! - `seed.rs`: demo fixtures

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use mebel_auth::TokenVerifier;

use crate::config::AppConfig;
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod seed;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services(&config).await?);

    if config.seed_demo {
        seed::seed_demo_data(&services).await?;
    }

    let tokens: Arc<dyn TokenVerifier> = services.tokens.clone();
    let auth_state = middleware::AuthState { tokens };

    let api = routes::router(auth_state).layer(Extension(services));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", api))
}
