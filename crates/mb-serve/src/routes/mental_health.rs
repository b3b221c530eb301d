use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::ids::MentalRecordId;
use mb_core::types::io::{CreateMentalRecordInput, UpdateMentalRecordInput, UserFilter};
use mb_core::types::mental::MentalHealthRecord;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/mental-health", get(list_records).post(create_record))
        .route(
            "/mental-health/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    operation_id = "list_mental_records",
    path = "/api/mental-health",
    params(UserFilter),
    responses((status = 200, body = Vec<MentalHealthRecord>))
)]
pub(crate) async fn list_records(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.mental_health().list(&filter)?))
}

#[utoipa::path(
    post,
    operation_id = "create_mental_record",
    path = "/api/mental-health",
    request_body = CreateMentalRecordInput,
    responses((status = 201, body = MentalHealthRecord))
)]
pub(crate) async fn create_record(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateMentalRecordInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.mental_health().create(input)?, None))
}

#[utoipa::path(
    get,
    operation_id = "get_mental_record",
    path = "/api/mental-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses((status = 200, body = MentalHealthRecord))
)]
pub(crate) async fn get_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: MentalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.mental_health().get(&id)?))
}

#[utoipa::path(
    put,
    operation_id = "update_mental_record",
    path = "/api/mental-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    request_body = UpdateMentalRecordInput,
    responses((status = 200, body = MentalHealthRecord))
)]
pub(crate) async fn update_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateMentalRecordInput>,
) -> Result<Response, ApiError> {
    let id: MentalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.mental_health().update(&id, input)?))
}

#[utoipa::path(
    delete,
    operation_id = "delete_mental_record",
    path = "/api/mental-health/{id}",
    params(("id" = String, Path, description = "Record ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_record(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: MentalRecordId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.mental_health().delete(&id)?;
    Ok(done("Record deleted successfully"))
}
