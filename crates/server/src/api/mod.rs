use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use dashboard_api::{
    dashboard_layout, resolve_payload_range, success_pie_chart, success_payload_scatter,
};
use serde::Deserialize;
use shared::{
    domain::SiteSelection,
    error::{ApiError, ErrorCode},
    protocol::{DashboardLayout, Figure},
};
use tracing::debug;

use crate::app_state::AppState;

static INDEX_HTML: &str = include_str!("../../assets/index.html");

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

#[derive(Debug, Deserialize)]
pub(crate) struct PieQuery {
    #[serde(default)]
    site: SiteSelection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScatterQuery {
    #[serde(default)]
    site: SiteSelection,
    low: Option<f64>,
    high: Option<f64>,
}

pub(crate) async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn layout(State(state): State<Arc<AppState>>) -> Json<DashboardLayout> {
    Json(dashboard_layout(&state.dashboard))
}

pub(crate) async fn pie_chart(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PieQuery>,
) -> Json<Figure> {
    debug!(site = %q.site, "rendering success pie chart");
    Json(success_pie_chart(&state.dashboard, &q.site))
}

pub(crate) async fn scatter_chart(
    State(state): State<Arc<AppState>>,
    Query(q): Query<ScatterQuery>,
) -> ApiResult<Figure> {
    let range = resolve_payload_range(&state.dashboard, q.low, q.high).map_err(error_response)?;
    debug!(
        site = %q.site,
        low = range.low(),
        high = range.high(),
        "rendering payload scatter chart"
    );
    Ok(Json(success_payload_scatter(
        &state.dashboard,
        &q.site,
        &range,
    )))
}

fn error_response(err: ApiError) -> (StatusCode, Json<ApiError>) {
    let status = match err.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
    };
    (status, Json(err))
}
