//! Application state shared across all handlers.

use std::sync::Arc;

use lifelink_core::config::AppConfig;
use lifelink_service::dispatch::NotificationDispatcher;
use lifelink_service::donor::DonorService;
use lifelink_service::matching::MatchEngine;
use lifelink_service::notification::NotificationService;
use lifelink_service::request::RequestService;
use lifelink_service::sweep::SweepService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Donor directory service.
    pub donor_service: Arc<DonorService>,
    /// Blood request intake service.
    pub request_service: Arc<RequestService>,
    /// Matching engine.
    pub match_engine: Arc<MatchEngine>,
    /// Notification dispatcher.
    pub dispatcher: Arc<NotificationDispatcher>,
    /// Notification log administration.
    pub notification_service: Arc<NotificationService>,
    /// Unmatched-request sweep.
    pub sweep_service: Arc<SweepService>,
}
