//! Donor repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use lifelink_core::error::{AppError, ErrorKind};
use lifelink_core::result::AppResult;
use lifelink_entity::donor::{BloodType, CreateDonor, Donor, UpdateDonor};

use super::DonorStore;

/// PostgreSQL-backed donor store.
#[derive(Debug, Clone)]
pub struct DonorRepository {
    pool: PgPool,
}

impl DonorRepository {
    /// Create a new donor repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonorStore for DonorRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find donor", e))
    }

    async fn find_all(&self) -> AppResult<Vec<Donor>> {
        sqlx::query_as::<_, Donor>("SELECT * FROM donors ORDER BY created_at")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list donors", e))
    }

    async fn find_available_by_types(&self, types: &[BloodType]) -> AppResult<Vec<Donor>> {
        sqlx::query_as::<_, Donor>(
            "SELECT * FROM donors WHERE blood_type = ANY($1) AND availability_status = TRUE \
             ORDER BY created_at",
        )
        .bind(types.to_vec())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to query available donors", e)
        })
    }

    async fn create(&self, donor: &CreateDonor) -> AppResult<Donor> {
        sqlx::query_as::<_, Donor>(
            "INSERT INTO donors (name, age, blood_type, phone, email, city, location, availability_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(&donor.name)
        .bind(donor.age)
        .bind(donor.blood_type)
        .bind(&donor.phone)
        .bind(&donor.email)
        .bind(&donor.city)
        .bind(&donor.location)
        .bind(donor.availability_status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create donor", e))
    }

    async fn update(&self, id: Uuid, changes: &UpdateDonor) -> AppResult<Option<Donor>> {
        sqlx::query_as::<_, Donor>(
            "UPDATE donors SET \
                name = COALESCE($2, name), \
                phone = COALESCE($3, phone), \
                email = COALESCE($4, email), \
                city = COALESCE($5, city), \
                location = COALESCE($6, location), \
                availability_status = COALESCE($7, availability_status), \
                last_donation_date = COALESCE($8, last_donation_date), \
                updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.email)
        .bind(&changes.city)
        .bind(&changes.location)
        .bind(changes.availability_status)
        .bind(changes.last_donation_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update donor", e))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM donors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete donor", e))?;
        Ok(result.rows_affected() > 0)
    }
}
