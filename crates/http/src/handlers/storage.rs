//! Remote-persistence endpoints consumed by `RemoteJsonAdapter`.
//!
//! File-backed: they delegate to a `JsonFsAdapter`, so their semantics
//! (mkdir-recursive-then-write, unlink, recursive `.json` scan) mirror the
//! filesystem backend exactly.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;

use interester_storage::StorageAdapter;

use crate::api_error::ApiError;
use crate::api_types::{DeleteRequest, ListQuery, WriteRequest};
use crate::AppState;

pub async fn write_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<WriteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.key.is_empty() {
        return Err(ApiError::BadRequest("Key is required".to_owned()));
    }

    state.fs.write(&req.key, &req.data).await?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn delete_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DeleteRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if req.key.is_empty() {
        return Err(ApiError::BadRequest("Key is required".to_owned()));
    }
    if !state.fs.exists(&req.key).await? {
        return Err(ApiError::NotFound(format!("no such key: {}", req.key)));
    }

    state.fs.delete(&req.key).await?;
    Ok(Json(serde_json::json!({"success": true})))
}

pub async fn list_keys(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let keys = state.fs.list(query.prefix.as_deref()).await?;
    Ok(Json(serde_json::json!({"success": true, "keys": keys})))
}

/// Static-data read path used by the remote adapter's `read` and `exists`.
pub async fn read_key(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let value = state
        .fs
        .read(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no such key: {key}")))?;
    Ok(Json(value))
}
