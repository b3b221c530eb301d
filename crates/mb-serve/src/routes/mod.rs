pub mod chatbot;
pub mod envelope;
pub mod error;
pub mod events;
pub mod health_centers;
pub mod health_tips;
pub mod help_requests;
pub mod maternal_health;
pub mod mental_health;
pub mod statistics;
pub mod symptom_checks;
pub mod workers;

use crate::middleware::correlation::correlation_middleware;
use crate::routes::error::ApiError;
use crate::{AppState, openapi};
use axum::routing::get;
use axum::{Json, Router, middleware};
use serde_json::{Value, json};

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .merge(help_requests::router(state.clone()))
        .merge(mental_health::router(state.clone()))
        .merge(maternal_health::router(state.clone()))
        .merge(symptom_checks::router(state.clone()))
        .merge(health_centers::router(state.clone()))
        .merge(health_tips::router(state.clone()))
        .merge(workers::router(state.clone()))
        .merge(events::router(state.clone()))
        .merge(statistics::router(state.clone()))
        .merge(chatbot::router(state.clone()))
        .merge(openapi::router());

    Router::new()
        .route("/", get(banner))
        .nest("/api", api)
        .fallback(unknown_route)
        .layer(middleware::from_fn_with_state(state, correlation_middleware))
}

async fn banner() -> Json<Value> {
    Json(json!({
        "message": "Mon Bondhu API Server is running!",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "healthTips": "/api/health-tips",
            "healthCenters": "/api/health-centers",
            "events": "/api/events",
            "workers": "/api/workers",
            "helpRequests": "/api/help-requests",
            "mentalHealth": "/api/mental-health",
            "maternalHealth": "/api/maternal-health",
            "symptomChecks": "/api/symptom-checks",
            "statistics": "/api/statistics",
            "chatbot": "/api/chatbot",
            "docs": "/api/docs"
        }
    }))
}

async fn unknown_route() -> ApiError {
    ApiError::not_found("Route not found")
}
