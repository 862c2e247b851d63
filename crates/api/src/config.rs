//! Process configuration.

/// Runtime configuration for the API server.
///
/// `AppConfig::from_env()` is the only place environment variables are read;
/// tests build the struct directly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listen address, `MEBEL_BIND_ADDR` (default `0.0.0.0:8080`).
    pub bind_addr: String,
    /// HMAC secret for session tokens, `JWT_SECRET`.
    pub jwt_secret: String,
    /// `DATABASE_URL`. Set: Postgres-backed stores. Unset: in-memory stores.
    pub database_url: Option<String>,
    /// `MEBEL_SEED_DEMO=1` loads the demo fixtures at startup.
    pub seed_demo: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let bind_addr =
            std::env::var("MEBEL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let database_url = std::env::var("DATABASE_URL").ok();
        let seed_demo = std::env::var("MEBEL_SEED_DEMO")
            .map(|v| v == "1")
            .unwrap_or(false);

        Self {
            bind_addr,
            jwt_secret,
            database_url,
            seed_demo,
        }
    }
}
