use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{routing::get, Router};
use dashboard_api::DashboardContext;
use dataset::LaunchTable;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use app_state::AppState;
use config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let table = LaunchTable::from_path(&settings.dataset_path)
        .map_err(|error| {
            error!(
                dataset = %settings.dataset_path.display(),
                %error,
                "failed to load launch dataset"
            );
            error
        })
        .context("loading launch dataset")?;

    let bounds = table.payload_bounds();
    info!(
        rows = table.len(),
        sites = table.sites().len(),
        min_payload = bounds.low(),
        max_payload = bounds.high(),
        "launch dataset loaded"
    );

    let state = AppState {
        dashboard: DashboardContext::new(table, settings.slider),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/healthz", get(api::healthz))
        .route("/api/layout", get(api::layout))
        .route("/api/charts/success-pie", get(api::pie_chart))
        .route(
            "/api/charts/success-payload-scatter",
            get(api::scatter_chart),
        )
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
