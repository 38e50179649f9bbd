//! HTTP SMS gateway sender.

use std::time::Duration;

use async_trait::async_trait;

use lifelink_core::config::delivery::DeliveryConfig;
use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_core::traits::{MessageSender, SendOutcome};

/// Sends messages through a JSON HTTP SMS gateway.
///
/// One POST per send, no internal retries. The client timeout mirrors
/// `delivery.timeout_seconds` so a stuck gateway cannot hold a dispatch
/// slot past the configured bound.
#[derive(Debug)]
pub struct HttpSmsSender {
    client: reqwest::Client,
    gateway_url: String,
    api_key: String,
    sender_id: String,
}

impl HttpSmsSender {
    /// Create a new gateway client from configuration.
    pub fn new(config: &DeliveryConfig) -> Result<Self, AppError> {
        if config.gateway_url.is_empty() {
            return Err(AppError::configuration(
                "delivery.gateway_url is required for the http provider",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    format!("Failed to build HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            client,
            gateway_url: config.gateway_url.clone(),
            api_key: config.api_key.clone(),
            sender_id: config.sender_id.clone(),
        })
    }
}

#[async_trait]
impl MessageSender for HttpSmsSender {
    fn provider(&self) -> &str {
        "http"
    }

    async fn send(&self, recipient: &str, message: &str) -> AppResult<SendOutcome> {
        let response = self
            .client
            .post(&self.gateway_url)
            .header("apiKey", &self.api_key)
            .json(&serde_json::json!({
                "to": recipient,
                "from": self.sender_id,
                "message": message,
            }))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Delivery,
                    format!("SMS gateway request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(SendOutcome::accepted())
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, body = %body, "SMS gateway rejected message");
            Ok(SendOutcome::rejected(format!("gateway returned {status}")))
        }
    }
}
