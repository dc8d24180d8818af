//! Preference routes: upsert, lookup, enable/disable, auto-provisioning.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use courier_common::error::AppError;
use courier_engine::preference::UpsertPreferenceParams;

use crate::dto::PreferenceResponse;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/preferences", post(upsert_preference))
        .route("/api/preferences/provision", post(provision_preference))
        .route("/api/preferences/{user_id}", get(get_preference))
        .route("/api/preferences/{user_id}/enabled", put(set_enabled))
}

/// POST /api/preferences — Create or replace a user's preference.
async fn upsert_preference(
    State(state): State<AppState>,
    Json(params): Json<UpsertPreferenceParams>,
) -> Result<(StatusCode, Json<PreferenceResponse>), AppError> {
    let preference = state.preferences.upsert(&params).await?;
    Ok((StatusCode::CREATED, Json(preference.into())))
}

/// GET /api/preferences/:user_id — Fetch a user's preference.
async fn get_preference(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PreferenceResponse>, AppError> {
    let preference = state.preferences.get_by_user_id(user_id).await?;
    Ok(Json(preference.into()))
}

#[derive(Debug, Deserialize)]
struct SetEnabledBody {
    enabled: bool,
}

/// PUT /api/preferences/:user_id/enabled — Toggle notifications for a user.
async fn set_enabled(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetEnabledBody>,
) -> Result<Json<PreferenceResponse>, AppError> {
    let preference = state.preferences.set_enabled(user_id, body.enabled).await?;
    Ok(Json(preference.into()))
}

#[derive(Debug, Deserialize)]
struct ProvisionBody {
    user_id: Uuid,
    contact_info: String,
}

/// POST /api/preferences/provision — Return the existing preference, or
/// create an opted-out default for a user who has never configured one.
async fn provision_preference(
    State(state): State<AppState>,
    Json(body): Json<ProvisionBody>,
) -> Result<Json<PreferenceResponse>, AppError> {
    let preference = state
        .preferences
        .get_or_provision(body.user_id, &body.contact_info)
        .await?;
    Ok(Json(preference.into()))
}
