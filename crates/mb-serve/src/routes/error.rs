use crate::Environment;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mb_core::MonBondhuError;
use mb_core::error::{DirectoryError, HelpError, RecordError, SymptomError};
use serde::Serialize;
use utoipa::ToSchema;

pub const HIDDEN_INTERNAL_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub success: bool,
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// A failed request. Rendered once by the handler and again by the
/// correlation middleware, which knows the id and the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "invalid_input",
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            code: "not_found",
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal_error",
            message: message.into(),
        }
    }

    pub fn render(&self, environment: Environment, correlation_id: Option<String>) -> Response {
        let message = if self.status.is_server_error() && !environment.is_development() {
            HIDDEN_INTERNAL_MESSAGE.to_string()
        } else {
            self.message.clone()
        };
        (
            self.status,
            Json(ErrorEnvelope {
                success: false,
                code: self.code.to_string(),
                message,
                correlation_id,
            }),
        )
            .into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = self.render(Environment::Production, None);
        response.extensions_mut().insert(self);
        response
    }
}

impl From<MonBondhuError> for ApiError {
    fn from(err: MonBondhuError) -> Self {
        match &err {
            MonBondhuError::Help(help) => map_help_error(help),
            MonBondhuError::Record(record) => map_record_error(record),
            MonBondhuError::Directory(directory) => map_directory_error(directory),
            MonBondhuError::Symptom(_) => Self::invalid(err.to_string()),
            MonBondhuError::Internal { .. } => Self::internal(err.to_string()),
        }
    }
}

impl From<SymptomError> for ApiError {
    fn from(err: SymptomError) -> Self {
        MonBondhuError::from(err).into()
    }
}

fn map_help_error(err: &HelpError) -> ApiError {
    match err {
        HelpError::NotFound | HelpError::TicketNotFound => ApiError::not_found(err.to_string()),
        HelpError::TicketCodeTaken | HelpError::TicketCodesExhausted { .. } => ApiError {
            status: StatusCode::CONFLICT,
            code: "conflict",
            message: err.to_string(),
        },
        HelpError::InvalidInput { .. } => ApiError::invalid(err.to_string()),
        HelpError::Storage { .. } => ApiError::internal(err.to_string()),
    }
}

fn map_record_error(err: &RecordError) -> ApiError {
    match err {
        RecordError::NotFound { .. } | RecordError::ScheduleEntryNotFound { .. } => {
            ApiError::not_found(err.to_string())
        }
        RecordError::InvalidInput { .. } => ApiError::invalid(err.to_string()),
        RecordError::Storage { .. } => ApiError::internal(err.to_string()),
    }
}

fn map_directory_error(err: &DirectoryError) -> ApiError {
    match err {
        DirectoryError::NotFound { .. } => ApiError::not_found(err.to_string()),
        DirectoryError::InvalidInput { .. } => ApiError::invalid(err.to_string()),
        DirectoryError::Storage { .. } => ApiError::internal(err.to_string()),
    }
}
