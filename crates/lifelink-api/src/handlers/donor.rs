//! Donor directory handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use lifelink_entity::donor::{BloodType, CreateDonor, Donor, UpdateDonor};

use crate::dto::request::{CreateDonorRequest, UpdateDonorRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/donors
pub async fn list_donors(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Donor>>>, ApiError> {
    let donors = state.donor_service.list().await?;
    Ok(Json(ApiResponse::ok(donors)))
}

/// GET /api/donors/{id}
pub async fn get_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Donor>>, ApiError> {
    let donor = state.donor_service.get(id).await?;
    Ok(Json(ApiResponse::ok(donor)))
}

/// POST /api/donors
pub async fn create_donor(
    State(state): State<AppState>,
    Json(req): Json<CreateDonorRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Donor>>), ApiError> {
    req.validate()?;
    let blood_type: BloodType = req.blood_type.parse()?;

    let donor = state
        .donor_service
        .create(CreateDonor {
            name: req.name,
            age: req.age,
            blood_type,
            phone: req.phone,
            email: req.email,
            city: req.city,
            location: req.location,
            availability_status: req.availability_status,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(donor))))
}

/// PUT /api/donors/{id}
pub async fn update_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateDonorRequest>,
) -> Result<Json<ApiResponse<Donor>>, ApiError> {
    req.validate()?;

    let donor = state
        .donor_service
        .update(
            id,
            UpdateDonor {
                name: req.name,
                phone: req.phone,
                email: req.email,
                city: req.city,
                location: req.location,
                availability_status: req.availability_status,
                last_donation_date: req.last_donation_date,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(donor)))
}

/// DELETE /api/donors/{id}
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.donor_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Donor deleted successfully".to_string(),
    })))
}
