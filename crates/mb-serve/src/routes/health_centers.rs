use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::directory::{GeoPoint, HealthCenter, NearbyHealthCenter};
use mb_core::types::ids::HealthCenterId;
use mb_core::types::io::{
    CreateHealthCenterInput, HealthCenterFilter, NearbyQuery, UpdateHealthCenterInput,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health-centers", get(list_centers).post(create_center))
        .route("/health-centers/nearby/{lat}/{lng}", get(nearby))
        .route(
            "/health-centers/{id}",
            get(get_center).put(update_center).delete(delete_center),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/health-centers",
    params(HealthCenterFilter),
    responses((status = 200, body = Vec<HealthCenter>))
)]
pub(crate) async fn list_centers(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<HealthCenterFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.health_centers().list(&filter)?))
}

#[utoipa::path(
    get,
    path = "/api/health-centers/nearby/{lat}/{lng}",
    params(
        ("lat" = f64, Path, description = "Latitude in degrees"),
        ("lng" = f64, Path, description = "Longitude in degrees"),
        NearbyQuery
    ),
    responses((status = 200, body = Vec<NearbyHealthCenter>, description = "Nearest first"))
)]
pub(crate) async fn nearby(
    State(state): State<AppState>,
    ApiPath((lat, lng)): ApiPath<(f64, f64)>,
    ApiQuery(query): ApiQuery<NearbyQuery>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core
        .health_centers()
        .nearby(GeoPoint { lat, lng }, query)?))
}

#[utoipa::path(
    post,
    path = "/api/health-centers",
    request_body = CreateHealthCenterInput,
    responses((status = 201, body = HealthCenter))
)]
pub(crate) async fn create_center(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateHealthCenterInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.health_centers().create(input)?, None))
}

#[utoipa::path(
    get,
    path = "/api/health-centers/{id}",
    params(("id" = String, Path, description = "Health center ID")),
    responses((status = 200, body = HealthCenter))
)]
pub(crate) async fn get_center(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HealthCenterId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.health_centers().get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/health-centers/{id}",
    params(("id" = String, Path, description = "Health center ID")),
    request_body = UpdateHealthCenterInput,
    responses((status = 200, body = HealthCenter))
)]
pub(crate) async fn update_center(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateHealthCenterInput>,
) -> Result<Response, ApiError> {
    let id: HealthCenterId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.health_centers().update(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/health-centers/{id}",
    params(("id" = String, Path, description = "Health center ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_center(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HealthCenterId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.health_centers().delete(&id)?;
    Ok(done("Health center deleted successfully"))
}
