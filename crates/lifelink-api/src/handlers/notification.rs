//! Notification handlers: log administration and dispatch entry points.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use lifelink_entity::notification::{DeliveryStatus, Notification, UpdateNotification};
use lifelink_service::dispatch::DispatchSummary;
use lifelink_service::sweep::SweepReport;

use crate::dto::request::{CreateNotificationRequest, UpdateNotificationRequest};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let notifications = state.notification_service.list().await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// GET /api/notifications/{id}
pub async fn get_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let notification = state.notification_service.get(id).await?;
    Ok(Json(ApiResponse::ok(notification)))
}

/// POST /api/notifications
///
/// Sends operator-supplied text to a donor and records the attempt.
/// Delivery failure is a valid outcome, not an HTTP error: the row
/// comes back with status `failed`.
pub async fn create_notification(
    State(state): State<AppState>,
    Json(req): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    req.validate()?;

    let notification = state
        .dispatcher
        .send_manual(req.donor_id, req.request_id, req.message)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(notification))))
}

/// PUT /api/notifications/{id}
pub async fn update_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateNotificationRequest>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    req.validate()?;
    let status: Option<DeliveryStatus> = req.status.as_deref().map(str::parse).transpose()?;

    let notification = state
        .notification_service
        .update(
            id,
            UpdateNotification {
                message: req.message,
                status,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(notification)))
}

/// DELETE /api/notifications/{id}
pub async fn delete_notification(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.notification_service.delete(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Notification deleted successfully".to_string(),
    })))
}

/// POST /api/notifications/notify-match/{match_id}
pub async fn notify_match(
    State(state): State<AppState>,
    Path(match_id): Path<Uuid>,
) -> Result<(StatusCode, Json<ApiResponse<Notification>>), ApiError> {
    let notification = state.dispatcher.notify_match(match_id).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(notification))))
}

/// POST /api/notifications/batch-notify-request/{request_id}
pub async fn batch_notify_request(
    State(state): State<AppState>,
    Path(request_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DispatchSummary>>, ApiError> {
    let summary = state.dispatcher.notify_batch(request_id).await?;
    Ok(Json(ApiResponse::ok(summary)))
}

/// POST /api/notifications/check-unmatched-requests
pub async fn check_unmatched_requests(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<SweepReport>>, ApiError> {
    let report = state.sweep_service.sweep_unmatched().await?;
    Ok(Json(ApiResponse::ok(report)))
}
