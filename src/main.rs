//! LifeLink Server — blood donation matching and notification platform.
//!
//! Main entry point: loads configuration, initializes logging, connects
//! the database, runs migrations, and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use lifelink_core::config::AppConfig;
use lifelink_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("LIFELINK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Connect the database, migrate, and hand off to the server
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting LifeLink v{}", env!("CARGO_PKG_VERSION"));

    let pool = lifelink_database::DatabasePool::connect(&config.database)
        .await?
        .into_pool();

    lifelink_database::migration::run_migrations(&pool).await?;

    lifelink_api::app::run_server(config, pool).await
}
