//! Blood request intake CRUD.

use std::sync::Arc;

use uuid::Uuid;

use lifelink_core::error::AppError;
use lifelink_core::result::AppResult;
use lifelink_database::repositories::RequestStore;
use lifelink_entity::request::{BloodRequest, CreateBloodRequest, UpdateBloodRequest};

/// Manages blood request records.
#[derive(Debug, Clone)]
pub struct RequestService {
    requests: Arc<dyn RequestStore>,
}

impl RequestService {
    /// Create a new request service.
    pub fn new(requests: Arc<dyn RequestStore>) -> Self {
        Self { requests }
    }

    /// Look up a request.
    pub async fn get(&self, id: Uuid) -> AppResult<BloodRequest> {
        self.requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))
    }

    /// List all requests.
    pub async fn list(&self) -> AppResult<Vec<BloodRequest>> {
        self.requests.find_all().await
    }

    /// Open a new request.
    pub async fn create(&self, request: CreateBloodRequest) -> AppResult<BloodRequest> {
        self.requests.create(&request).await
    }

    /// Apply a partial update, enforcing forward-only status transitions.
    pub async fn update(&self, id: Uuid, changes: UpdateBloodRequest) -> AppResult<BloodRequest> {
        let existing = self.get(id).await?;

        if let Some(next) = changes.status {
            if next != existing.status && !existing.status.can_transition_to(next) {
                return Err(AppError::conflict(format!(
                    "Illegal request transition: {} -> {}",
                    existing.status, next
                )));
            }
        }

        self.requests
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::not_found("Blood request not found"))
    }

    /// Remove a request.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.requests.delete(id).await? {
            return Err(AppError::not_found("Blood request not found"));
        }
        Ok(())
    }
}
