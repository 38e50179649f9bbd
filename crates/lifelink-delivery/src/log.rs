//! Log sender for local development.

use async_trait::async_trait;

use lifelink_core::result::AppResult;
use lifelink_core::traits::{MessageSender, SendOutcome};

/// Writes the message to the log instead of sending it. Always accepts.
#[derive(Debug, Default)]
pub struct LogSender;

impl LogSender {
    /// Create a new log sender.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MessageSender for LogSender {
    fn provider(&self) -> &str {
        "log"
    }

    async fn send(&self, recipient: &str, message: &str) -> AppResult<SendOutcome> {
        tracing::info!(recipient = %recipient, message = %message, "Outbound message (log sender)");
        Ok(SendOutcome::accepted())
    }
}
