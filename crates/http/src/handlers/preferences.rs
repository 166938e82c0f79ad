use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use interester_core::{ApiResponse, PreferencesUpdate, UserPreferences};

use crate::api_error::ApiError;
use crate::AppState;

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<UserPreferences>>, ApiError> {
    let prefs = state.preferences.get().await?;
    Ok(Json(ApiResponse::ok(prefs)))
}

pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(updates): Json<PreferencesUpdate>,
) -> Result<Json<ApiResponse<UserPreferences>>, ApiError> {
    let updated = state.preferences.update(updates).await?;
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn reset_preferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<UserPreferences>>, ApiError> {
    let defaults = state.preferences.reset().await?;
    Ok(Json(ApiResponse::ok(defaults)))
}
