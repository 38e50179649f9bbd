//! Blood request repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::request::{
    BloodRequest, CreateBloodRequest, RequestStatus, UpdateBloodRequest,
};

use super::RequestStore;

/// PostgreSQL-backed blood request store.
#[derive(Debug, Clone)]
pub struct BloodRequestRepository {
    pool: PgPool,
}

impl BloodRequestRepository {
    /// Create a new blood request repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for BloodRequestRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find blood request", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>("SELECT * FROM blood_requests ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list blood requests", e)
            })
    }

    async fn find_unmatched_pending(&self) -> AppResult<Vec<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "SELECT r.* FROM blood_requests r \
             LEFT JOIN donor_matches m ON m.request_id = r.id \
             WHERE r.status = $1 AND m.id IS NULL \
             ORDER BY r.created_at",
        )
        .bind(RequestStatus::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query unmatched requests", e)
        })
    }

    async fn create(&self, request: &CreateBloodRequest) -> AppResult<BloodRequest> {
        sqlx::query_as::<_, BloodRequest>(
            "INSERT INTO blood_requests \
                (patient_name, blood_type, hospital, city, location, contact_number, urgency, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&request.patient_name)
        .bind(request.blood_type)
        .bind(&request.hospital)
        .bind(&request.city)
        .bind(&request.location)
        .bind(&request.contact_number)
        .bind(request.urgency)
        .bind(RequestStatus::Pending)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create blood request", e)
        })
    }

    async fn update(
        &self,
        id: Uuid,
        changes: &UpdateBloodRequest,
    ) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET \
                patient_name = COALESCE($2, patient_name), \
                hospital = COALESCE($3, hospital), \
                city = COALESCE($4, city), \
                location = COALESCE($5, location), \
                contact_number = COALESCE($6, contact_number), \
                urgency = COALESCE($7, urgency), \
                status = COALESCE($8, status), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.patient_name)
        .bind(&changes.hospital)
        .bind(&changes.city)
        .bind(&changes.location)
        .bind(&changes.contact_number)
        .bind(changes.urgency)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update blood request", e)
        })
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: RequestStatus,
    ) -> AppResult<Option<BloodRequest>> {
        sqlx::query_as::<_, BloodRequest>(
            "UPDATE blood_requests SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update request status", e)
        })
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM blood_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete blood request", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
