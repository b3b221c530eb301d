use crate::ticket::TicketCode;
use crate::types::directory::Worker;
use crate::types::enums::{HelpStatus, RequestType, Urgency};
use crate::types::ids::{HelpRequestId, WorkerId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequest {
    pub id: HelpRequestId,
    pub ticket_code: TicketCode,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub request_type: RequestType,
    pub description: String,
    pub urgency: Urgency,
    pub status: HelpStatus,
    pub response: Option<String>,
    pub assigned_worker: Option<WorkerId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A help request with its assigned worker resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestDetail {
    #[serde(flatten)]
    pub request: HelpRequest,
    pub worker: Option<Worker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusCount {
    pub status: HelpStatus,
    pub count: u64,
}
