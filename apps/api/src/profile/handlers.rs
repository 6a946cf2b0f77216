//! Axum route handlers for the Profile API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::profile::StudentProfile;
use crate::profile::store::{get_profile, upsert_profile, StudentProfileRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub user_id: String,
    pub profile: StudentProfile,
}

/// PUT /api/v1/profile
///
/// Saves or replaces the user's profile document.
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(request): Json<SaveProfileRequest>,
) -> Result<Json<StudentProfileRecord>, AppError> {
    if request.user_id.trim().is_empty() {
        return Err(AppError::Input("userId cannot be empty".to_string()));
    }
    request.profile.validate().map_err(AppError::Input)?;

    let record = upsert_profile(&state.db, &request.user_id, &request.profile).await?;
    Ok(Json(record))
}

/// GET /api/v1/profile/:user_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<StudentProfileRecord>, AppError> {
    get_profile(&state.db, &user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No profile found for user {user_id}")))
}
