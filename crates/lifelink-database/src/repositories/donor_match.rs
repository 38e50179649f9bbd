//! Donor match repository implementation.
//!
//! The `donor_matches` table carries `UNIQUE (request_id, donor_id)`;
//! together with `ON CONFLICT DO NOTHING` this makes concurrent
//! auto-match runs race-safe without an advisory lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::donor_match::{DonorMatch, MatchStatus, NewMatch};

use super::MatchStore;

/// PostgreSQL-backed match store.
#[derive(Debug, Clone)]
pub struct MatchRepository {
    pool: PgPool,
}

impl MatchRepository {
    /// Create a new match repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchStore for MatchRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<DonorMatch>> {
        sqlx::query_as::<_, DonorMatch>("SELECT * FROM donor_matches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find match", e))
    }

    async fn find_all(&self) -> AppResult<Vec<DonorMatch>> {
        sqlx::query_as::<_, DonorMatch>("SELECT * FROM donor_matches ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list matches", e))
    }

    async fn find_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>> {
        sqlx::query_as::<_, DonorMatch>(
            "SELECT * FROM donor_matches WHERE request_id = $1 ORDER BY created_at",
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list matches for request", e)
        })
    }

    async fn find_pending_by_request(&self, request_id: Uuid) -> AppResult<Vec<DonorMatch>> {
        sqlx::query_as::<_, DonorMatch>(
            "SELECT * FROM donor_matches WHERE request_id = $1 AND status = $2 ORDER BY created_at",
        )
        .bind(request_id)
        .bind(MatchStatus::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending matches", e)
        })
    }

    async fn insert_batch(&self, matches: &[NewMatch]) -> AppResult<Vec<DonorMatch>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let mut created = Vec::with_capacity(matches.len());
        for m in matches {
            let row = sqlx::query_as::<_, DonorMatch>(
                "INSERT INTO donor_matches (request_id, donor_id, status, notified_at) \
                 VALUES ($1, $2, $3, $4) \
                 ON CONFLICT (request_id, donor_id) DO NOTHING \
                 RETURNING *",
            )
            .bind(m.request_id)
            .bind(m.donor_id)
            .bind(MatchStatus::Pending)
            .bind(m.notified_at)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert match", e)
            })?;

            if let Some(row) = row {
                created.push(row);
            }
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit match batch", e)
        })?;

        Ok(created)
    }

    async fn advance_status(
        &self,
        id: Uuid,
        from: MatchStatus,
        to: MatchStatus,
        notified_at: Option<DateTime<Utc>>,
    ) -> AppResult<Option<DonorMatch>> {
        sqlx::query_as::<_, DonorMatch>(
            "UPDATE donor_matches SET status = $3, notified_at = COALESCE($4, notified_at) \
             WHERE id = $1 AND status = $2 RETURNING *",
        )
        .bind(id)
        .bind(from)
        .bind(to)
        .bind(notified_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to advance match status", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM donor_matches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete match", e))?;
        Ok(result.rows_affected() > 0)
    }
}
