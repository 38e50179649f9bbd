//! Outbound message delivery configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the external message sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Sender provider: `"http"` (SMS gateway) or `"log"` (development).
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the HTTP SMS gateway.
    #[serde(default)]
    pub gateway_url: String,
    /// API key for the gateway.
    #[serde(default)]
    pub api_key: String,
    /// Sender identifier attached to outbound messages.
    #[serde(default = "default_sender_id")]
    pub sender_id: String,
    /// Upper bound on a single send attempt, in seconds. A send that
    /// exceeds this is recorded as failed.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            gateway_url: String::new(),
            api_key: String::new(),
            sender_id: default_sender_id(),
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "log".to_string()
}

fn default_sender_id() -> String {
    "LIFELINK".to_string()
}

fn default_timeout() -> u64 {
    10
}
