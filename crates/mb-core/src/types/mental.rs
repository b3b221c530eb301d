use crate::types::enums::Mood;
use crate::types::ids::{AnonymousId, MentalRecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One mood check-in. Same-day submissions are separate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MentalHealthRecord {
    pub id: MentalRecordId,
    pub user_id: AnonymousId,
    pub mood: Option<Mood>,
    pub mood_level: Option<u8>,
    pub activities: Vec<String>,
    pub notes: Option<String>,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Records without a named mood are counted under `mood: null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MoodCount {
    pub mood: Option<Mood>,
    pub count: u64,
}
