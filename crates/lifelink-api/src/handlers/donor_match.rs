//! Match engine handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use lifelink_entity::donor_match::{DonorMatch, MatchStatus};

use crate::dto::request::UpdateMatchRequest;
use crate::dto::response::{
    ApiResponse, AutoMatchResponse, MatchCandidateResponse, MatchesForRequestResponse,
    MessageResponse,
};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/matches/auto-match/{request_id}
pub async fn auto_match(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<AutoMatchResponse>>), ApiError> {
    let request = state.request_service.get(request_id).await?;
    let candidates = state.match_engine.auto_match(request_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(AutoMatchResponse {
            request,
            matches: candidates
                .into_iter()
                .map(MatchCandidateResponse::from)
                .collect(),
        })),
    ))
}

/// GET /api/matches
pub async fn list_matches(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<DonorMatch>>>, ApiError> {
    let matches = state.match_engine.list_matches().await?;
    Ok(Json(ApiResponse::ok(matches)))
}

/// GET /api/matches/{id}
pub async fn get_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DonorMatch>>, ApiError> {
    let donor_match = state.match_engine.get_match(id).await?;
    Ok(Json(ApiResponse::ok(donor_match)))
}

/// GET /api/matches/for-request/{request_id}
pub async fn matches_for_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<MatchesForRequestResponse>>, ApiError> {
    let (request, candidates) = state.match_engine.matches_for_request(request_id).await?;

    Ok(Json(ApiResponse::ok(MatchesForRequestResponse {
        request,
        matches: candidates
            .into_iter()
            .map(MatchCandidateResponse::from)
            .collect(),
    })))
}

/// PUT /api/matches/{id}
///
/// Records an externally driven status change (donor accepted, declined,
/// donation completed) and triggers the follow-up notification.
pub async fn update_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Json<ApiResponse<DonorMatch>>, ApiError> {
    req.validate()?;
    let status: MatchStatus = req.status.parse()?;

    let updated = state.dispatcher.handle_status_change(id, status).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

/// DELETE /api/matches/{id}
pub async fn delete_match(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.match_engine.delete_match(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Donor match deleted successfully".to_string(),
    })))
}
