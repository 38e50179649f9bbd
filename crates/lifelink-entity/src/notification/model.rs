//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;
use super::status::DeliveryStatus;

/// One outbound message and its delivery outcome.
///
/// Notifications are an append-only log: every dispatch attempt creates a
/// new row, and corrections happen via new rows rather than edits. The
/// single exception is an administrative override of `message`/`status`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Recipient donor, absent for requester-directed messages.
    pub donor_id: Option<Uuid>,
    /// Related blood request (optional).
    pub request_id: Option<Uuid>,
    /// The address the message was sent to.
    pub recipient: String,
    /// Which template the message was rendered from.
    pub kind: NotificationKind,
    /// Rendered message text.
    pub message: String,
    /// Delivery outcome.
    pub status: DeliveryStatus,
    /// When the notification was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to record a new notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNotification {
    /// Recipient donor, absent for requester-directed messages.
    pub donor_id: Option<Uuid>,
    /// Related blood request (optional).
    pub request_id: Option<Uuid>,
    /// The address the message was sent to.
    pub recipient: String,
    /// Which template the message was rendered from.
    pub kind: NotificationKind,
    /// Rendered message text.
    pub message: String,
    /// Delivery outcome.
    pub status: DeliveryStatus,
}

/// Administrative override of a recorded notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateNotification {
    /// Corrected message text.
    pub message: Option<String>,
    /// Corrected delivery status.
    pub status: Option<DeliveryStatus>,
}
