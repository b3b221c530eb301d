use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, patch};
use mb_core::types::help::{HelpRequest, HelpRequestDetail};
use mb_core::types::ids::HelpRequestId;
use mb_core::types::io::{
    AssignWorkerInput, HelpRequestFilter, HelpStatusInput, SubmitHelpRequestInput,
    UpdateHelpRequestInput,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/help-requests", get(list_requests).post(submit_request))
        .route("/help-requests/code/{code}", get(get_by_code))
        .route(
            "/help-requests/{id}",
            get(get_request).put(update_request).delete(delete_request),
        )
        .route("/help-requests/{id}/status", patch(update_status))
        .route("/help-requests/{id}/assign", patch(assign_worker))
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/help-requests",
    params(HelpRequestFilter),
    responses((status = 200, body = Vec<HelpRequest>))
)]
pub(crate) async fn list_requests(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<HelpRequestFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().list(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/help-requests",
    request_body = SubmitHelpRequestInput,
    responses(
        (status = 201, body = HelpRequest, description = "Submitted; keep the ticket code"),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn submit_request(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubmitHelpRequestInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    let request = core.help_requests().submit(input)?;
    Ok(created(request, Some("Help request submitted successfully")))
}

#[utoipa::path(
    get,
    path = "/api/help-requests/code/{code}",
    params(("code" = String, Path, description = "Ticket code, e.g. নীল-মাছ-482")),
    responses(
        (status = 200, body = HelpRequestDetail),
        (status = 404, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn get_by_code(
    State(state): State<AppState>,
    ApiPath(code): ApiPath<String>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().get_by_code(&code)?))
}

#[utoipa::path(
    get,
    path = "/api/help-requests/{id}",
    params(("id" = String, Path, description = "Help request ID")),
    responses((status = 200, body = HelpRequestDetail))
)]
pub(crate) async fn get_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HelpRequestId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/help-requests/{id}",
    params(("id" = String, Path, description = "Help request ID")),
    request_body = UpdateHelpRequestInput,
    responses((status = 200, body = HelpRequest))
)]
pub(crate) async fn update_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateHelpRequestInput>,
) -> Result<Response, ApiError> {
    let id: HelpRequestId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().update(&id, input)?))
}

#[utoipa::path(
    patch,
    path = "/api/help-requests/{id}/status",
    params(("id" = String, Path, description = "Help request ID")),
    request_body = HelpStatusInput,
    responses((status = 200, body = HelpRequest))
)]
pub(crate) async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<HelpStatusInput>,
) -> Result<Response, ApiError> {
    let id: HelpRequestId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().update_status(&id, input)?))
}

#[utoipa::path(
    patch,
    path = "/api/help-requests/{id}/assign",
    params(("id" = String, Path, description = "Help request ID")),
    request_body = AssignWorkerInput,
    responses(
        (status = 200, body = HelpRequestDetail),
        (status = 404, body = crate::routes::error::ErrorEnvelope, description = "Request or worker missing")
    )
)]
pub(crate) async fn assign_worker(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<AssignWorkerInput>,
) -> Result<Response, ApiError> {
    let id: HelpRequestId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.help_requests().assign(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/help-requests/{id}",
    params(("id" = String, Path, description = "Help request ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_request(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: HelpRequestId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.help_requests().delete(&id)?;
    Ok(done("Help request deleted successfully"))
}
