//! Donor directory CRUD.

use std::sync::Arc;

use uuid::Uuid;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::repositories::DonorStore;
use lifelink_entity::donor::{CreateDonor, Donor, UpdateDonor};

/// Manages donor records.
#[derive(Debug, Clone)]
pub struct DonorService {
    donors: Arc<dyn DonorStore>,
}

impl DonorService {
    /// Create a new donor service.
    pub fn new(donors: Arc<dyn DonorStore>) -> Self {
        Self { donors }
    }

    /// Look up a donor.
    pub async fn get(&self, id: Uuid) -> AppResult<Donor> {
        self.donors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))
    }

    /// List all donors.
    pub async fn list(&self) -> AppResult<Vec<Donor>> {
        self.donors.find_all().await
    }

    /// Register a new donor.
    pub async fn create(&self, donor: CreateDonor) -> AppResult<Donor> {
        if donor.age < 16 {
            return Err(AppError::validation("Donors must be at least 16 years old"));
        }
        self.donors.create(&donor).await
    }

    /// Apply a partial update.
    pub async fn update(&self, id: Uuid, changes: UpdateDonor) -> AppResult<Donor> {
        self.donors
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Donor not found"))
    }

    /// Remove a donor.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.donors.delete(id).await? {
            return Err(AppError::not_found("Donor not found"));
        }
        Ok(())
    }
}
