//! HTTP API server for interester.

pub mod api_error;
mod api_types;
mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use interester_storage::{InterestStore, JsonFsAdapter, PreferencesStore, ResultStore, StorageContext};

pub use api_error::ApiError;

/// Shared application state for all HTTP handlers.
///
/// The domain stores run against the configured storage context; the
/// filesystem adapter backs the remote-persistence endpoints regardless of
/// which backend the stores use.
pub struct AppState {
    pub interests: InterestStore,
    pub preferences: PreferencesStore,
    pub results: ResultStore,
    pub fs: JsonFsAdapter,
}

impl AppState {
    pub fn new(ctx: Arc<StorageContext>, data_dir: impl Into<std::path::PathBuf>) -> Self {
        Self {
            interests: InterestStore::new(Arc::clone(&ctx)),
            preferences: PreferencesStore::new(Arc::clone(&ctx)),
            results: ResultStore::new(ctx),
            fs: JsonFsAdapter::new(data_dir),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/interests",
            get(handlers::interests::list_interests).post(handlers::interests::create_interest),
        )
        .route(
            "/api/interests/{id}",
            get(handlers::interests::get_interest)
                .put(handlers::interests::update_interest)
                .delete(handlers::interests::delete_interest),
        )
        .route(
            "/api/preferences",
            get(handlers::preferences::get_preferences)
                .put(handlers::preferences::update_preferences),
        )
        .route("/api/preferences/reset", post(handlers::preferences::reset_preferences))
        .route("/api/results", get(handlers::results::list_result_interests))
        .route("/api/results/{interest_id}", get(handlers::results::get_results))
        .route("/api/storage/write", post(handlers::storage::write_key))
        .route("/api/storage/delete", post(handlers::storage::delete_key))
        .route("/api/storage/list", get(handlers::storage::list_keys))
        .route("/data/{*key}", get(handlers::storage::read_key))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
