use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::{get, post};
use mb_core::symptom_tree;
use mb_core::types::ids::SymptomCheckId;
use mb_core::types::io::{CreateSymptomCheckInput, UserFilter, WalkInput};
use mb_core::types::symptom::{SymptomCheck, WalkStep};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/symptom-checks", get(list_checks).post(create_check))
        .route("/symptom-checks/tree", get(tree))
        .route("/symptom-checks/walk", post(walk))
        .route(
            "/symptom-checks/{id}",
            get(get_check).delete(delete_check),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/symptom-checks/tree",
    responses((status = 200, body = serde_json::Value, description = "The full decision tree"))
)]
pub(crate) async fn tree() -> Response {
    ok(symptom_tree::tree())
}

#[utoipa::path(
    post,
    path = "/api/symptom-checks/walk",
    request_body = WalkInput,
    responses(
        (status = 200, body = WalkStep, description = "Next question, or the verdict"),
        (status = 400, body = crate::routes::error::ErrorEnvelope)
    )
)]
pub(crate) async fn walk(ApiJson(input): ApiJson<WalkInput>) -> Result<Response, ApiError> {
    Ok(ok(symptom_tree::walk(input.answers.as_slice())?))
}

#[utoipa::path(
    get,
    path = "/api/symptom-checks",
    params(UserFilter),
    responses((status = 200, body = Vec<SymptomCheck>))
)]
pub(crate) async fn list_checks(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<UserFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.symptom_checks().list(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/symptom-checks",
    request_body = CreateSymptomCheckInput,
    responses((status = 201, body = SymptomCheck))
)]
pub(crate) async fn create_check(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateSymptomCheckInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.symptom_checks().create(input)?, None))
}

#[utoipa::path(
    get,
    path = "/api/symptom-checks/{id}",
    params(("id" = String, Path, description = "Check ID")),
    responses((status = 200, body = SymptomCheck))
)]
pub(crate) async fn get_check(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: SymptomCheckId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.symptom_checks().get(&id)?))
}

#[utoipa::path(
    delete,
    path = "/api/symptom-checks/{id}",
    params(("id" = String, Path, description = "Check ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_check(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: SymptomCheckId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.symptom_checks().delete(&id)?;
    Ok(done("Check deleted"))
}
