use crate::types::enums::{ScheduleKind, TrackingType};
use crate::types::ids::{AnonymousId, MaternalRecordId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// What a maternal record is tracking, with the date its schedule hangs off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "trackingType", rename_all = "lowercase")]
pub enum Anchor {
    Pregnancy {
        #[serde(rename = "lmpDate")]
        lmp_date: NaiveDate,
        /// Expected delivery date.
        edd: NaiveDate,
    },
    Child {
        #[serde(rename = "birthDate")]
        birth_date: NaiveDate,
    },
}

impl Anchor {
    pub fn tracking_type(&self) -> TrackingType {
        match self {
            Self::Pregnancy { .. } => TrackingType::Pregnancy,
            Self::Child { .. } => TrackingType::Child,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    #[serde(rename = "type")]
    pub kind: ScheduleKind,
    pub week: Option<u32>,
    pub date: NaiveDate,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Checkup {
    pub date: NaiveDate,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub notes: Option<String>,
    pub next_checkup_date: Option<NaiveDate>,
}

/// Free-form details about the mother or child. None of it drives logic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaternalProfile {
    pub mother_name: Option<String>,
    pub age: Option<u32>,
    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,
    pub village: Option<String>,
    pub blood_group: Option<String>,
    pub previous_pregnancies: Option<u32>,
    pub notes: Option<String>,
    #[serde(default)]
    pub vaccinations: Vec<String>,
    #[serde(default)]
    pub complications: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaternalRecord {
    pub id: MaternalRecordId,
    pub user_id: AnonymousId,
    #[serde(flatten)]
    pub anchor: Anchor,
    pub schedule: Vec<ScheduleEntry>,
    pub checkups: Vec<Checkup>,
    #[serde(flatten)]
    pub profile: MaternalProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
