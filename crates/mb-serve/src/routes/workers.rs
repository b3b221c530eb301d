use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::directory::Worker;
use mb_core::types::ids::WorkerId;
use mb_core::types::io::{CreateWorkerInput, UpdateWorkerInput, WorkerFilter};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/workers", get(list_workers).post(create_worker))
        .route(
            "/workers/{id}",
            get(get_worker).put(update_worker).delete(delete_worker),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/workers",
    params(WorkerFilter),
    responses((status = 200, body = Vec<Worker>))
)]
pub(crate) async fn list_workers(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<WorkerFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.workers().list(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/workers",
    request_body = CreateWorkerInput,
    responses((status = 201, body = Worker))
)]
pub(crate) async fn create_worker(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateWorkerInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.workers().create(input)?, None))
}

#[utoipa::path(
    get,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker ID")),
    responses((status = 200, body = Worker))
)]
pub(crate) async fn get_worker(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: WorkerId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.workers().get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker ID")),
    request_body = UpdateWorkerInput,
    responses((status = 200, body = Worker))
)]
pub(crate) async fn update_worker(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateWorkerInput>,
) -> Result<Response, ApiError> {
    let id: WorkerId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.workers().update(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/workers/{id}",
    params(("id" = String, Path, description = "Worker ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_worker(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: WorkerId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.workers().delete(&id)?;
    Ok(done("Worker deleted successfully"))
}
