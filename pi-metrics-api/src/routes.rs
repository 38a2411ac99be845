pub use crate::query_data::query_data_handler;

use crate::cors;
use crate::state::AppState;
use axum::{response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/data", get(query_data_handler))
        .route("/healthz", get(health_handler))
        .with_state(state)
        .layer(axum::middleware::from_fn(cors::apply_cors))
        .layer(TraceLayer::new_for_http())
}

pub async fn health_handler() -> impl IntoResponse {
    // Simple readiness/health endpoint. Keep it lightweight.
    Json(json!({ "status": "ok" }))
}
