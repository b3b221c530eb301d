use crate::extract::{ApiJson, ApiPath, ApiQuery, parse_id};
use crate::routes::envelope::{created, done, ok};
use crate::routes::error::ApiError;
use crate::{AppState, build_core};
use axum::Router;
use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use mb_core::types::directory::HealthEvent;
use mb_core::types::ids::EventId;
use mb_core::types::io::{CreateEventInput, EventFilter, UpdateEventInput};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/events", get(list_events).post(create_event))
        .route(
            "/events/{id}",
            get(get_event).put(update_event).delete(delete_event),
        )
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/api/events",
    params(EventFilter),
    responses((status = 200, body = Vec<HealthEvent>, description = "Soonest first"))
)]
pub(crate) async fn list_events(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<EventFilter>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(ok(core.events().list(&filter)?))
}

#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventInput,
    responses((status = 201, body = HealthEvent))
)]
pub(crate) async fn create_event(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateEventInput>,
) -> Result<Response, ApiError> {
    let core = build_core(&state)?;
    Ok(created(core.events().create(input)?, None))
}

#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    responses((status = 200, body = HealthEvent))
)]
pub(crate) async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.events().get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    request_body = UpdateEventInput,
    responses((status = 200, body = HealthEvent))
)]
pub(crate) async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
    ApiJson(input): ApiJson<UpdateEventInput>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let core = build_core(&state)?;
    Ok(ok(core.events().update(&id, input)?))
}

#[utoipa::path(
    delete,
    path = "/api/events/{id}",
    params(("id" = String, Path, description = "Event ID")),
    responses((status = 200))
)]
pub(crate) async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<String>,
) -> Result<Response, ApiError> {
    let id: EventId = parse_id(&id)?;
    let core = build_core(&state)?;
    core.events().delete(&id)?;
    Ok(done("Event deleted successfully"))
}
