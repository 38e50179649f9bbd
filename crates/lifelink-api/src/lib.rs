//! # lifelink-api
//!
//! HTTP surface for LifeLink. Thin Axum handlers translate between
//! JSON DTOs and the services in `lifelink-service`; all business rules
//! live below this layer.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
