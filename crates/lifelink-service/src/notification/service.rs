//! Notification log administration.
//!
//! Read and correct the append-only notification log. Sending lives in
//! [`crate::dispatch`]; this service never touches the transport.

use std::sync::Arc;

use uuid::Uuid;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::repositories::NotificationStore;
use lifelink_entity::notification::{Notification, UpdateNotification};

/// Manages recorded notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Look up a notification.
    pub async fn get(&self, id: Uuid) -> AppResult<Notification> {
        self.notifications
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// List all notifications, most recent first.
    pub async fn list(&self) -> AppResult<Vec<Notification>> {
        self.notifications.find_all().await
    }

    /// Administrative override of message text or delivery status.
    pub async fn update(&self, id: Uuid, changes: UpdateNotification) -> AppResult<Notification> {
        self.notifications
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Notification not found"))
    }

    /// Remove a notification record.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.notifications.delete(id).await? {
            return Err(AppError::not_found("Notification not found"));
        }
        Ok(())
    }
}
