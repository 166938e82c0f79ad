use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use interester_core::{ApiResponse, Interest, InterestCreateInput, InterestUpdateInput};

use crate::api_error::ApiError;
use crate::AppState;

pub async fn list_interests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Interest>>>, ApiError> {
    let interests = state.interests.get_all().await?;
    Ok(Json(ApiResponse::ok(interests)))
}

pub async fn create_interest(
    State(state): State<Arc<AppState>>,
    Json(input): Json<InterestCreateInput>,
) -> Result<(StatusCode, Json<ApiResponse<Interest>>), ApiError> {
    if input.name.trim().is_empty() || input.search_terms.is_empty() {
        return Err(ApiError::BadRequest(
            "Name and at least one search term are required".to_owned(),
        ));
    }

    let interest = state.interests.create(input).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(interest))))
}

pub async fn get_interest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Interest>>, ApiError> {
    let interest = state
        .interests
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Interest not found".to_owned()))?;
    Ok(Json(ApiResponse::ok(interest)))
}

pub async fn update_interest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(updates): Json<InterestUpdateInput>,
) -> Result<Json<ApiResponse<Interest>>, ApiError> {
    let updated = state
        .interests
        .update(&id, updates)
        .await?
        .ok_or_else(|| ApiError::NotFound("Interest not found".to_owned()))?;
    Ok(Json(ApiResponse::ok(updated)))
}

pub async fn delete_interest(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !state.interests.delete(&id).await? {
        return Err(ApiError::NotFound("Interest not found".to_owned()));
    }
    // Stored results for the interest go with it.
    state.results.delete(&id).await?;
    Ok(Json(serde_json::json!({"success": true})))
}
