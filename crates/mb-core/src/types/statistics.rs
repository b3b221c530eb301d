use crate::types::help::StatusCount;
use crate::types::mental::MoodCount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatistics {
    pub total_checkins_this_week: u64,
    pub mental_health_checkins: u64,
    pub maternal_health_checkins: u64,
    pub total_health_centers: u64,
    pub total_help_requests: u64,
    pub help_requests_this_week: u64,
    pub total_events: u64,
    pub upcoming_events: u64,
    pub total_workers: u64,
    pub help_requests_by_status: Vec<StatusCount>,
    pub mood_distribution: Vec<MoodCount>,
    pub window_start: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}
