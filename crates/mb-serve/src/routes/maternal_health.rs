use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, patch, post};
use mb_core::types::ids::MaternalRecordId;
use mb_core::types::io::{
    CheckupInput, CreateMaternalRecordInput, ScheduleProgressInput, UpdateMaternalRecordInput,
    UserFilter,
};
use mb_core::types::maternal::MaternalRecord;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/maternal-health", get(list_records).post(create_record))
        .route(
            "/maternal-health/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .route("/maternal-health/{id}/checkup", post(add_checkup))
        .route(
            "/maternal-health/{id}/schedule/{index}",
            patch(set_schedule_progress),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    operation_id = "list_maternal_records",
    path = "/api/maternal-health",
    params(UserFilter),
    responses((status = 200, body = Vec<MaternalRecord>))
)]
pub(crate) async fn list_records(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.maternal_health().list(&filter)?))
}

#[utoipa::path(
    post,
    operation_id = "create_maternal_record",
    path = "/api/maternal-health",
    request_body = CreateMaternalRecordInput,
    responses(
        (status = 201, body = MaternalRecord, description = "Created with its reminder schedule"),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn create_record(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMaternalRecordInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.maternal_health().create(input)?, None))
}

#[utoipa::path(
    get,
    operation_id = "get_maternal_record",
    path = "/api/maternal-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses((status = 200, body = MaternalRecord))
)]
pub(crate) async fn get_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: MaternalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.maternal_health().get(&id)?))
}

#[utoipa::path(
    put,
    operation_id = "update_maternal_record",
    path = "/api/maternal-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = UpdateMaternalRecordInput,
    responses((status = 200, body = MaternalRecord))
)]
pub(crate) async fn update_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateMaternalRecordInput>,
) -> Result<Response, ApiError> {
    let id: MaternalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.maternal_health().update(&id, input)?))
}

#[utoipa::path(
    post,
    path = "/api/maternal-health/{id}/checkup",
    params(("id" = String, Path, description = "Record ID")),
    request_body = CheckupInput,
    responses((status = 200, body = MaternalRecord))
)]
pub(crate) async fn add_checkup(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<CheckupInput>,
) -> Result<Response, ApiError> {
    let id: MaternalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.maternal_health().add_checkup(&id, input)?))
}

#[utoipa::path(
    patch,
    path = "/api/maternal-health/{id}/schedule/{index}",
    params(
        ("id" = String, Path, description = "Record ID"),
        ("index" = usize, Path, description = "Zero-based schedule position")
    ),
    request_body = ScheduleProgressInput,
    responses((status = 200, body = MaternalRecord))
)]
pub(crate) async fn set_schedule_progress(
    State(state): State<AppState>,
    ApiPath((id, index)): ApiPath<(String, usize)>,
    ApiJson(input): ApiJson<ScheduleProgressInput>,
) -> Result<Response, ApiError> {
    let id: MaternalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core
        .maternal_health()
        .set_schedule_progress(&id, index, input)?))
}

#[utoipa::path(
    delete,
    operation_id = "delete_maternal_record",
    path = "/api/maternal-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: MaternalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.maternal_health().delete(&id)?;
    Ok(done("Record deleted successfully"))
}
