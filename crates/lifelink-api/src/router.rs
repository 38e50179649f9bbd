//! Route definitions for the LifeLink HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(donor_routes())
        .merge(request_routes())
        .merge(match_routes())
        .merge(notification_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Donor directory CRUD
fn donor_routes() -> Router<AppState> {
    Router::new()
        .route("/donors", get(handlers::donor::list_donors))
        .route("/donors", post(handlers::donor::create_donor))
        .route("/donors/{id}", get(handlers::donor::get_donor))
        .route("/donors/{id}", put(handlers::donor::update_donor))
        .route("/donors/{id}", delete(handlers::donor::delete_donor))
}

/// Blood request intake CRUD
fn request_routes() -> Router<AppState> {
    Router::new()
        .route("/requests", get(handlers::request::list_requests))
        .route("/requests", post(handlers::request::create_request))
        .route("/requests/{id}", get(handlers::request::get_request))
        .route("/requests/{id}", put(handlers::request::update_request))
        .route("/requests/{id}", delete(handlers::request::delete_request))
}

/// Matching engine endpoints
fn match_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/matches/auto-match/{request_id}",
            post(handlers::donor_match::auto_match),
        )
        .route(
            "/matches/for-request/{request_id}",
            get(handlers::donor_match::matches_for_request),
        )
        .route("/matches", get(handlers::donor_match::list_matches))
        .route("/matches/{id}", get(handlers::donor_match::get_match))
        .route("/matches/{id}", put(handlers::donor_match::update_match))
        .route("/matches/{id}", delete(handlers::donor_match::delete_match))
}

/// Notification log and dispatch endpoints
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/notifications",
            post(handlers::notification::create_notification),
        )
        .route(
            "/notifications/notify-match/{match_id}",
            post(handlers::notification::notify_match),
        )
        .route(
            "/notifications/batch-notify-request/{request_id}",
            post(handlers::notification::batch_notify_request),
        )
        .route(
            "/notifications/check-unmatched-requests",
            post(handlers::notification::check_unmatched_requests),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::get_notification),
        )
        .route(
            "/notifications/{id}",
            put(handlers::notification::update_notification),
        )
        .route(
            "/notifications/{id}",
            delete(handlers::notification::delete_notification),
        )
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// Build CORS layer from configuration
fn build_cors_layer(state: &AppState) -> CorsLayer {
    let cors_config = &state.config.server.cors;

    let mut cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if cors_config.allowed_origins.contains(&"*".to_string()) {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<axum::http::HeaderValue> = cors_config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors = cors.allow_origin(origins);
    }

    cors.max_age(std::time::Duration::from_secs(cors_config.max_age_seconds))
}
