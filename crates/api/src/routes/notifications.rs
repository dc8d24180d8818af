//! Notification routes: dispatch, history, clearing, retry.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use courier_common::error::AppError;
use courier_engine::dispatch::SendNotificationParams;

use crate::dto::NotificationResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/notifications", post(send_notification))
        .route("/api/notifications/{user_id}", get(get_history))
        .route("/api/notifications/{user_id}", delete(clear_history))
        .route("/api/notifications/{user_id}/retry", put(retry_failed))
}

/// POST /api/notifications — Dispatch a notification to a user.
///
/// Returns 201 even when delivery failed; the outcome is carried in the
/// response body's `status` field. Gate failures map to 404/403.
async fn send_notification(
    State(state): State<AppState>,
    Json(params): Json<SendNotificationParams>,
) -> Result<(StatusCode, Json<NotificationResponse>), AppError> {
    let notification = state.dispatch.send(&params).await?;
    Ok((StatusCode::CREATED, Json(notification.into())))
}

/// GET /api/notifications/:user_id — Non-deleted history for a user.
async fn get_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let notifications = state.history.get_history(user_id).await?;
    Ok(Json(notifications.into_iter().map(Into::into).collect()))
}

/// DELETE /api/notifications/:user_id — Soft-delete the user's history.
/// Returns the records that were cleared.
async fn clear_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<NotificationResponse>>, AppError> {
    let cleared = state.history.clear(user_id).await?;
    Ok(Json(cleared.into_iter().map(Into::into).collect()))
}

/// PUT /api/notifications/:user_id/retry — Re-attempt the user's failed,
/// non-deleted notifications. New outcomes are observable via history.
async fn retry_failed(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.dispatch.retry_failed(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
