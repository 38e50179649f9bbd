//! Blood request intake handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use lifelink_entity::donor::BloodType;
use lifelink_entity::request::{
    BloodRequest, CreateBloodRequest, RequestStatus, UpdateBloodRequest, UrgencyLevel,
};

use crate::dto::request::{CreateBloodRequestRequest, UpdateBloodRequestRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/requests
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<BloodRequest>>>, ApiError> {
    let requests = state.request_service.list().await?;
    Ok(Json(ApiResponse::ok(requests)))
}

/// GET /api/requests/{id}
pub async fn get_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    let request = state.request_service.get(id).await?;
    Ok(Json(ApiResponse::ok(request)))
}

/// POST /api/requests
pub async fn create_request(
    State(state): State<AppState>,
    Json(req): Json<CreateBloodRequestRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BloodRequest>>), ApiError> {
    req.validate()?;
    let blood_type: BloodType = req.blood_type.parse()?;
    let urgency: UrgencyLevel = req.urgency.parse()?;

    let request = state
        .request_service
        .create(CreateBloodRequest {
            patient_name: req.patient_name,
            blood_type,
            hospital: req.hospital,
            city: req.city,
            location: req.location,
            contact_number: req.contact_number,
            urgency,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(request))))
}

/// PUT /api/requests/{id}
pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateBloodRequestRequest>,
) -> Result<Json<ApiResponse<BloodRequest>>, ApiError> {
    req.validate()?;
    let urgency: Option<UrgencyLevel> = req.urgency.as_deref().map(str::parse).transpose()?;
    let status: Option<RequestStatus> = req.status.as_deref().map(str::parse).transpose()?;

    let request = state
        .request_service
        .update(
            id,
            UpdateBloodRequest {
                patient_name: req.patient_name,
                hospital: req.hospital,
                city: req.city,
                location: req.location,
                contact_number: req.contact_number,
                urgency,
                status,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(request)))
}

/// DELETE /api/requests/{id}
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.request_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Blood request deleted successfully".to_string(),
    })))
}
