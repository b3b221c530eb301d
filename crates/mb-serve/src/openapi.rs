use utoipa::OpenApi;

use crate::routes::chatbot::{ChatbotHealth, ChatbotRequest, ChatbotResponse};
use crate::routes::error::ErrorEnvelope;
use axum::response::{Html, IntoResponse};
use axum::routing::get;
use axum::{Json, Router};
use mb_chat::{ChatReply, ReplySource};
use mb_core::ticket::TicketCode;
use mb_core::types::directory::{
    GeoPoint, HealthCenter, HealthEvent, HealthTip, NearbyHealthCenter, Worker,
};
use mb_core::types::enums::{
    Gender, HelpStatus, Language, Mood, RequestType, ScheduleKind, Severity, TrackingType, Urgency,
};
use mb_core::types::help::{HelpRequest, HelpRequestDetail, StatusCount};
use mb_core::types::ids::{
    AnonymousId, EventId, HealthCenterId, HealthTipId, HelpRequestId, MaternalRecordId,
    MentalRecordId, SymptomCheckId, WorkerId,
};
use mb_core::types::io::{
    AssignWorkerInput, CheckupInput, CreateEventInput, CreateHealthCenterInput,
    CreateHealthTipInput, CreateMaternalRecordInput, CreateMentalRecordInput,
    CreateSymptomCheckInput, CreateWorkerInput, HelpStatusInput, ScheduleProgressInput,
    SubmitHelpRequestInput, UpdateEventInput, UpdateHealthCenterInput, UpdateHealthTipInput,
    UpdateHelpRequestInput, UpdateMaternalRecordInput, UpdateMentalRecordInput,
    UpdateWorkerInput, WalkInput,
};
use mb_core::types::maternal::{Anchor, Checkup, MaternalProfile, MaternalRecord, ScheduleEntry};
use mb_core::types::mental::{MentalHealthRecord, MoodCount};
use mb_core::types::statistics::DashboardStatistics;
use mb_core::types::symptom::{ChoiceView, SymptomCheck, Verdict, WalkStep};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mon Bondhu API",
        description = "Anonymous help requests, health records and directories for community health work. Successful responses are wrapped as {success, data, message?}."
    ),
    paths(
        crate::routes::help_requests::list_requests,
        crate::routes::help_requests::submit_request,
        crate::routes::help_requests::get_by_code,
        crate::routes::help_requests::get_request,
        crate::routes::help_requests::update_request,
        crate::routes::help_requests::update_status,
        crate::routes::help_requests::assign_worker,
        crate::routes::help_requests::delete_request,
        crate::routes::mental_health::list_records,
        crate::routes::mental_health::create_record,
        crate::routes::mental_health::get_record,
        crate::routes::mental_health::update_record,
        crate::routes::mental_health::delete_record,
        crate::routes::maternal_health::list_records,
        crate::routes::maternal_health::create_record,
        crate::routes::maternal_health::get_record,
        crate::routes::maternal_health::update_record,
        crate::routes::maternal_health::add_checkup,
        crate::routes::maternal_health::set_schedule_progress,
        crate::routes::maternal_health::delete_record,
        crate::routes::symptom_checks::tree,
        crate::routes::symptom_checks::walk,
        crate::routes::symptom_checks::list_checks,
        crate::routes::symptom_checks::create_check,
        crate::routes::symptom_checks::get_check,
        crate::routes::symptom_checks::delete_check,
        crate::routes::health_centers::list_centers,
        crate::routes::health_centers::nearby,
        crate::routes::health_centers::create_center,
        crate::routes::health_centers::get_center,
        crate::routes::health_centers::update_center,
        crate::routes::health_centers::delete_center,
        crate::routes::health_tips::list_tips,
        crate::routes::health_tips::create_tip,
        crate::routes::health_tips::get_tip,
        crate::routes::health_tips::update_tip,
        crate::routes::health_tips::delete_tip,
        crate::routes::workers::list_workers,
        crate::routes::workers::create_worker,
        crate::routes::workers::get_worker,
        crate::routes::workers::update_worker,
        crate::routes::workers::delete_worker,
        crate::routes::events::list_events,
        crate::routes::events::create_event,
        crate::routes::events::get_event,
        crate::routes::events::update_event,
        crate::routes::events::delete_event,
        crate::routes::statistics::dashboard,
        crate::routes::chatbot::send_message,
        crate::routes::chatbot::health
    ),
    components(schemas(
        HelpRequest,
        HelpRequestDetail,
        StatusCount,
        SubmitHelpRequestInput,
        UpdateHelpRequestInput,
        HelpStatusInput,
        AssignWorkerInput,
        TicketCode,
        MentalHealthRecord,
        MoodCount,
        CreateMentalRecordInput,
        UpdateMentalRecordInput,
        MaternalRecord,
        MaternalProfile,
        Anchor,
        ScheduleEntry,
        Checkup,
        CreateMaternalRecordInput,
        UpdateMaternalRecordInput,
        CheckupInput,
        ScheduleProgressInput,
        SymptomCheck,
        Verdict,
        ChoiceView,
        WalkStep,
        CreateSymptomCheckInput,
        WalkInput,
        HealthCenter,
        NearbyHealthCenter,
        GeoPoint,
        CreateHealthCenterInput,
        UpdateHealthCenterInput,
        HealthTip,
        CreateHealthTipInput,
        UpdateHealthTipInput,
        Worker,
        CreateWorkerInput,
        UpdateWorkerInput,
        HealthEvent,
        CreateEventInput,
        UpdateEventInput,
        DashboardStatistics,
        ChatbotRequest,
        ChatbotResponse,
        ChatbotHealth,
        ChatReply,
        ReplySource,
        ErrorEnvelope,
        HelpRequestId,
        MentalRecordId,
        MaternalRecordId,
        SymptomCheckId,
        HealthCenterId,
        HealthTipId,
        WorkerId,
        EventId,
        AnonymousId,
        RequestType,
        Urgency,
        HelpStatus,
        Mood,
        Severity,
        TrackingType,
        ScheduleKind,
        Language,
        Gender
    )),
    tags(
        (name = "mon-bondhu", description = "Community health support")
    )
)]
struct ApiDoc;

pub fn generate_spec() -> String {
    ApiDoc::openapi()
        .to_pretty_json()
        .unwrap_or_else(|_| "{}".to_string())
}

pub fn router() -> Router {
    Router::new()
        .route("/openapi.json", get(openapi_json))
        .route("/docs", get(swagger_ui))
}

async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

async fn swagger_ui() -> Html<&'static str> {
    Html(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Mon Bondhu API Docs</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
  </head>
  <body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
      window.ui = SwaggerUIBundle({ url: '/api/openapi.json', dom_id: '#swagger-ui' });
    </script>
  </body>
</html>
"#,
    )
}
