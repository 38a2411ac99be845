mod config;
mod cors;
mod query_data;
mod routes;
mod state;
mod supabase;

use config::Config;
use state::AppState;
use std::sync::Arc;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = Config::from_env()?;
    let state = Arc::new(AppState::from_config(&cfg)?);

    let app = routes::build_router(state);

    let addr = cfg.listen_addr();
    info!(%addr, "Starting pi-metrics-api");

    let server = axum::Server::bind(&addr).serve(app.into_make_service());

    let graceful = server.with_graceful_shutdown(shutdown_signal());
    graceful.await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("Shutdown signal received");
}
