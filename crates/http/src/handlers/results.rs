use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use interester_core::{ApiResponse, FormattedResult};

use crate::api_error::ApiError;
use crate::AppState;

pub async fn get_results(
    State(state): State<Arc<AppState>>,
    Path(interest_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<FormattedResult>>>, ApiError> {
    let results = state.results.get_by_interest_id(&interest_id).await?;
    Ok(Json(ApiResponse::ok(results)))
}

pub async fn list_result_interests(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let ids = state.results.list_all().await?;
    Ok(Json(ApiResponse::ok(ids)))
}
