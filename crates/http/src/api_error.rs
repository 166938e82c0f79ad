//! Typed API error for HTTP handlers.
//!
//! Handlers return `Result<Json<T>, ApiError>`; every variant renders the
//! same `{"success": false, "error": ...}` envelope the rest of the API
//! uses. Internal failures are logged server-side and replaced with a
//! generic message so no backend detail leaks.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use interester_storage::StorageError;

#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request — invalid input from the caller.
    BadRequest(String),
    /// 404 Not Found — requested record doesn't exist.
    NotFound(String),
    /// 500 Internal Server Error — unexpected backend failure.
    Internal(StorageError),
    /// 503 Service Unavailable — storage not configured.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_owned())
            }
            Self::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };
        let body = serde_json::json!({"success": false, "error": message});
        (status, Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Unconfigured => {
                Self::ServiceUnavailable("storage is not configured".to_owned())
            }
            StorageError::InvalidKey(key) => Self::BadRequest(format!("invalid key: {key}")),
            other => Self::Internal(other),
        }
    }
}
