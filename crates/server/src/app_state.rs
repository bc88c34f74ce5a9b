use dashboard_api::DashboardContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) dashboard: DashboardContext,
}
