use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::directory::HealthTip;
use mb_core::types::ids::HealthTipId;
use mb_core::types::io::{CreateHealthTipInput, HealthTipFilter, UpdateHealthTipInput};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health-tips", get(list_tips).post(create_tip))
        .route(
            "/health-tips/{id}",
            get(get_tip).put(update_tip).delete(delete_tip),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/health-tips",
    params(HealthTipFilter),
    responses((status = 200, body = Vec<HealthTip>))
)]
pub(crate) async fn list_tips(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<HealthTipFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.health_tips().list(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/health-tips",
    request_body = CreateHealthTipInput,
    responses((status = 201, body = HealthTip))
)]
pub(crate) async fn create_tip(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateHealthTipInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.health_tips().create(input)?, None))
}

#[utoipa::path(
    get,
    path = "/api/health-tips/{id}",
    params(("id" = String, Path, description = "Health tip ID")),
    responses((status = 200, body = HealthTip))
)]
pub(crate) async fn get_tip(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HealthTipId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.health_tips().get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/health-tips/{id}",
    params(("id" = String, Path, description = "Health tip ID")),
    request_body = UpdateHealthTipInput,
    responses((status = 200, body = HealthTip))
)]
pub(crate) async fn update_tip(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateHealthTipInput>,
) -> Result<Response, ApiError> {
    let id: HealthTipId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.health_tips().update(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/health-tips/{id}",
    params(("id" = String, Path, description = "Health tip ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_tip(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HealthTipId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.health_tips().delete(&id)?;
    Ok(done("Health tip deleted successfully"))
}
