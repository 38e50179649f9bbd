//! Notification repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::notification::{NewNotification, Notification, UpdateNotification};

use super::NotificationStore;

/// PostgreSQL-backed notification store.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, notification: &NewNotification) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (donor_id, request_id, recipient, kind, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(notification.donor_id)
        .bind(notification.request_id)
        .bind(&notification.recipient)
        .bind(notification.kind)
        .bind(&notification.message)
        .bind(notification.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
            })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateNotification,
    ) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>(
            "UPDATE notifications SET \
                message = COALESCE($2, message), \
                status = COALESCE($3, status) \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.message)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update notification", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
