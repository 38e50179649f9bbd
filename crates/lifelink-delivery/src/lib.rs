//! # lifelink-delivery
//!
//! Implementations of the [`MessageSender`] trait from `lifelink-core`:
//! an HTTP SMS gateway client for production, a log sender for local
//! development, and an in-memory recorder for tests.

pub mod http;
pub mod log;
pub mod memory;

use std::sync::Arc;

use lifelink_core::config::delivery::DeliveryConfig;
use lifelink_core::error::AppError;
use lifelink_core::traits::MessageSender;

pub use http::HttpSmsSender;
pub use log::LogSender;
pub use memory::{MemorySender, SendBehavior};

/// Build the configured message sender.
pub fn build_sender(config: &DeliveryConfig) -> Result<Arc<dyn MessageSender>, AppError> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpSmsSender::new(config)?)),
        "log" => Ok(Arc::new(LogSender::new())),
        other => Err(AppError::configuration(format!(
            "Unknown delivery provider: '{other}'. Expected one of: http, log"
        ))),
    }
}
