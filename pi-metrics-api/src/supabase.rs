use crate::state::AppState;
use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const METRICS_TABLE: &str = "pi_metrics";

// Columns projected from the table; everything else stays upstream.
pub const SELECT_COLUMNS: &str =
    "timestamp,device_id,cpu_load,cpu_temp,ram_usage_percent,disk_usage_percent,network_latency_ms";

/// One row of device telemetry as stored in the hosted `pi_metrics` table.
///
/// Rows are read-only from this service's perspective; the schema is owned
/// by the upstream database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub timestamp: String,
    pub device_id: String,
    pub cpu_load: f64,
    pub cpu_temp: f64,
    pub ram_usage_percent: f64,
    pub disk_usage_percent: f64,
    // Null when the device was unreachable at sample time
    pub network_latency_ms: Option<f64>,
}

// PostgREST reports failures as a JSON object with a `message` field.
#[derive(Debug, Deserialize)]
struct UpstreamError {
    message: String,
}

/// Fetches the `limit` most recent rows from `pi_metrics`, newest first.
///
/// Issues a single PostgREST read with the service-role credential. Upstream
/// failures are surfaced with the upstream's own message and are not retried.
pub async fn fetch_recent_metrics(
    state: &AppState,
    limit: u32,
) -> anyhow::Result<Vec<MetricRecord>> {
    let url = format!(
        "{}/rest/v1/{}",
        state.supabase_url.as_str().trim_end_matches('/'),
        METRICS_TABLE
    );

    let limit_param = limit.to_string();
    let resp = state
        .client
        .get(&url)
        .query(&[
            ("select", SELECT_COLUMNS),
            ("order", "timestamp.desc"),
            ("limit", limit_param.as_str()),
        ])
        .header("apikey", &state.service_role_key)
        .header(
            "Authorization",
            format!("Bearer {}", state.service_role_key),
        )
        .send()
        .await?;

    let status = resp.status();
    let body = resp.bytes().await?;

    if !status.is_success() {
        // Surface the upstream message verbatim; fall back to the raw body
        // when it is not in the expected shape.
        let message = match serde_json::from_slice::<UpstreamError>(&body) {
            Ok(err) => err.message,
            Err(_) => String::from_utf8_lossy(&body).into_owned(),
        };
        bail!(message);
    }

    let rows: Vec<MetricRecord> = serde_json::from_slice(&body)?;
    debug!(count = rows.len(), limit, "fetched metric rows");
    Ok(rows)
}
