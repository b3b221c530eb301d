use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Success body shared by every resource: `{success, data?, message?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

pub fn ok<T: Serialize>(data: T) -> Response {
    Json(Envelope {
        success: true,
        data: Some(data),
        message: None,
    })
    .into_response()
}

pub fn created<T: Serialize>(data: T, message: Option<&'static str>) -> Response {
    (
        StatusCode::CREATED,
        Json(Envelope {
            success: true,
            data: Some(data),
            message,
        }),
    )
        .into_response()
}

pub fn done(message: &'static str) -> Response {
    Json(Envelope::<()> {
        success: true,
        data: None,
        message: Some(message),
    })
    .into_response()
}
