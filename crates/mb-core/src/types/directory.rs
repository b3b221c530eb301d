use crate::types::enums::{Gender, Language};
use crate::types::ids::{EventId, HealthCenterId, HealthTipId, WorkerId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthCenter {
    pub id: HealthCenterId,
    pub name: String,
    #[serde(rename = "type")]
    pub center_type: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    pub location_description: String,
    pub services: Vec<String>,
    pub timing: String,
    pub contact: Option<String>,
    pub location: Option<GeoPoint>,
    pub is_emergency: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NearbyHealthCenter {
    #[serde(flatten)]
    pub center: HealthCenter,
    pub distance_meters: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthTip {
    pub id: HealthTipId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub season: String,
    pub icon: String,
    pub language: Language,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A community health worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub gender: Option<Gender>,
    pub role: String,
    pub area: String,
    pub contact: String,
    pub trained_by: Option<String>,
    pub specialties: Vec<String>,
    pub email: Option<String>,
    pub location: Option<GeoPoint>,
    pub availability: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A health camp or similar community event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthEvent {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub services: Vec<String>,
    pub organizer: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
