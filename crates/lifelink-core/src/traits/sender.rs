//! Message sender trait for pluggable outbound delivery transports.

use async_trait::async_trait;

use crate::result::AppResult;

/// Result of a single send attempt as reported by the transport.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SendOutcome {
    /// Whether the gateway accepted the message.
    pub accepted: bool,
    /// Provider-specific detail (gateway message id, rejection reason).
    pub detail: Option<String>,
}

impl SendOutcome {
    /// An accepted outcome with no further detail.
    pub fn accepted() -> Self {
        Self {
            accepted: true,
            detail: None,
        }
    }

    /// A rejected outcome carrying the gateway's reason.
    pub fn rejected(detail: impl Into<String>) -> Self {
        Self {
            accepted: false,
            detail: Some(detail.into()),
        }
    }
}

/// Trait for outbound message transports.
///
/// The [`MessageSender`] trait is defined here in `lifelink-core` and
/// implemented in `lifelink-delivery` (HTTP SMS gateway, log sender,
/// in-memory recorder). A send is at-most-once per call: implementations
/// must not retry internally.
#[async_trait]
pub trait MessageSender: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "http", "log").
    fn provider(&self) -> &str;

    /// Attempt to deliver `message` to `recipient`.
    ///
    /// A transport-level failure is an `Err`; a gateway-level rejection is
    /// `Ok` with `accepted = false`. Callers treat both identically.
    async fn send(&self, recipient: &str, message: &str) -> AppResult<SendOutcome>;
}
