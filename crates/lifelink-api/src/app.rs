//! Application builder — wires stores, services, worker, and router
//! into a running server.

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::sync::watch;

use lifelink_core::config::AppConfig;
use lifelink_core::error::AppError;
use lifelink_database::repositories::{
    BloodRequestRepository, DonorRepository, DonorStore, MatchRepository, MatchStore,
    NotificationRepository, NotificationStore, RequestStore,
};
use lifelink_service::dispatch::NotificationDispatcher;
use lifelink_service::donor::DonorService;
use lifelink_service::matching::MatchEngine;
use lifelink_service::notification::NotificationService;
use lifelink_service::request::RequestService;
use lifelink_service::sweep::SweepService;
use lifelink_worker::SweepScheduler;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application from pre-wired state.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Wire all services over the given store implementations.
///
/// Router-level tests call this with the in-memory backend; production
/// wiring in [`run_server`] passes the Postgres repositories.
pub fn build_state(
    config: AppConfig,
    donors: Arc<dyn DonorStore>,
    requests: Arc<dyn RequestStore>,
    matches: Arc<dyn MatchStore>,
    notifications: Arc<dyn NotificationStore>,
    sender: Arc<dyn lifelink_core::traits::MessageSender>,
) -> AppState {
    let dispatcher = Arc::new(NotificationDispatcher::new(
        Arc::clone(&donors),
        Arc::clone(&requests),
        Arc::clone(&matches),
        Arc::clone(&notifications),
        sender,
        &config.matching,
        &config.delivery,
    ));

    let match_engine = Arc::new(MatchEngine::new(
        Arc::clone(&donors),
        Arc::clone(&requests),
        Arc::clone(&matches),
        Arc::clone(&dispatcher),
        &config.matching,
    ));

    let donor_service = Arc::new(DonorService::new(Arc::clone(&donors)));
    let request_service = Arc::new(RequestService::new(Arc::clone(&requests)));
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));
    let sweep_service = Arc::new(SweepService::new(
        Arc::clone(&requests),
        Arc::clone(&dispatcher),
    ));

    AppState {
        config: Arc::new(config),
        donor_service,
        request_service,
        match_engine,
        dispatcher,
        notification_service,
        sweep_service,
    }
}

/// Run the LifeLink server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db_pool: PgPool) -> Result<(), AppError> {
    tracing::info!("Starting LifeLink server...");

    // ── Step 1: Repositories ─────────────────────────────────────
    let donors: Arc<dyn DonorStore> = Arc::new(DonorRepository::new(db_pool.clone()));
    let requests: Arc<dyn RequestStore> = Arc::new(BloodRequestRepository::new(db_pool.clone()));
    let matches: Arc<dyn MatchStore> = Arc::new(MatchRepository::new(db_pool.clone()));
    let notifications: Arc<dyn NotificationStore> =
        Arc::new(NotificationRepository::new(db_pool.clone()));

    // ── Step 2: Outbound sender ──────────────────────────────────
    tracing::info!(provider = %config.delivery.provider, "Initializing message sender");
    let sender = lifelink_delivery::build_sender(&config.delivery)?;

    // ── Step 3: Services ─────────────────────────────────────────
    let state = build_state(
        config.clone(),
        donors,
        requests,
        matches,
        notifications,
        sender,
    );

    // ── Step 4: Sweep scheduler ──────────────────────────────────
    let scheduler = if config.worker.enabled {
        let scheduler =
            SweepScheduler::new(Arc::clone(&state.sweep_service), &config.worker).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Sweep worker disabled");
        None
    };

    // ── Step 5: HTTP server ──────────────────────────────────────
    let (shutdown_tx, _shutdown_rx) = watch::channel(false);

    let app = build_app(state);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("LifeLink server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
    }
}
