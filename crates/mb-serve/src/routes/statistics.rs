use crate::routes::envelope::ok;
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::statistics::DashboardStatistics;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/statistics", get(dashboard))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/statistics",
    responses((status = 200, body = DashboardStatistics, description = "Totals and the last seven days"))
)]
pub(crate) async fn dashboard(State(state): State<AppState>) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.statistics().dashboard()?))
}
