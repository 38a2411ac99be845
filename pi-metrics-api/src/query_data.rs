use crate::state::AppState;
use crate::supabase::{self, MetricRecord};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

const DEFAULT_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct DataQuery {
    // Kept as a raw string so the parsing policy lives in one place
    pub limit: Option<String>,
}

#[derive(Debug, Serialize)]
struct DataResponse {
    data: Vec<MetricRecord>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// `GET /api/data?limit=<N>` — returns the N most recent metric rows as
/// `{"data":[...]}`, newest first. Upstream failures map to a 500 with the
/// upstream's message as `{"error":...}`.
pub async fn query_data_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DataQuery>,
) -> Response {
    let limit = match parse_limit(query.limit.as_deref()) {
        Ok(limit) => limit,
        Err(message) => {
            warn!(%message, "rejected data request");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse { error: message }),
            )
                .into_response();
        }
    };
    debug!(limit, "querying recent metrics");

    match supabase::fetch_recent_metrics(&state, limit).await {
        Ok(data) => (StatusCode::OK, Json(DataResponse { data })).into_response(),
        Err(err) => {
            error!(error = %err, "metrics query failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

// An absent or empty limit falls back to the default. Anything that does not
// parse as a non-negative integer is rejected before the upstream is
// contacted.
fn parse_limit(raw: Option<&str>) -> Result<u32, String> {
    match raw {
        None => Ok(DEFAULT_LIMIT),
        Some(s) if s.is_empty() => Ok(DEFAULT_LIMIT),
        Some(s) => s
            .parse::<u32>()
            .map_err(|_| format!("invalid limit parameter: '{}'", s)),
    }
}
