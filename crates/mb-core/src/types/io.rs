use crate::types::directory::{GeoPoint, HealthCenter, HealthEvent, HealthTip, Worker};
use crate::types::enums::{
    Gender, HelpStatus, Language, Mood, RequestType, TrackingType, Urgency,
};
use crate::types::help::HelpRequest;
use crate::types::ids::{AnonymousId, WorkerId};
use crate::types::maternal::MaternalProfile;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitHelpRequestInput {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub request_type: RequestType,
    pub description: String,
    pub urgency: Option<Urgency>,
}

/// Editable fields of a help request. The ticket code is not among them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHelpRequestInput {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub request_type: Option<RequestType>,
    pub description: Option<String>,
    pub urgency: Option<Urgency>,
    pub status: Option<HelpStatus>,
    pub response: Option<String>,
    pub assigned_worker: Option<WorkerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HelpStatusInput {
    pub status: HelpStatus,
    pub response: Option<String>,
    pub assigned_worker: Option<WorkerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignWorkerInput {
    pub worker_id: WorkerId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct HelpRequestFilter {
    pub status: Option<HelpStatus>,
    pub urgency: Option<Urgency>,
    pub request_type: Option<RequestType>,
}

impl HelpRequestFilter {
    pub fn matches(&self, request: &HelpRequest) -> bool {
        self.status.is_none_or(|status| request.status == status)
            && self.urgency.is_none_or(|urgency| request.urgency == urgency)
            && self
                .request_type
                .is_none_or(|request_type| request.request_type == request_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMentalRecordInput {
    pub user_id: Option<AnonymousId>,
    pub mood: Option<Mood>,
    pub mood_level: Option<u8>,
    #[serde(default)]
    pub activities: Vec<String>,
    pub notes: Option<String>,
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMentalRecordInput {
    pub mood: Option<Mood>,
    pub mood_level: Option<u8>,
    pub activities: Option<Vec<String>>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    #[param(value_type = Option<String>)]
    pub user_id: Option<AnonymousId>,
}

impl UserFilter {
    pub fn matches(&self, user_id: &AnonymousId) -> bool {
        self.user_id.as_ref().is_none_or(|wanted| wanted == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaternalRecordInput {
    pub user_id: Option<AnonymousId>,
    pub tracking_type: Option<TrackingType>,
    #[serde(alias = "lmp")]
    pub lmp_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
    #[serde(flatten)]
    pub profile: MaternalProfile,
}

/// Profile edits. Tracking anchors and the generated schedule are fixed at
/// creation and cannot be changed here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaternalRecordInput {
    pub mother_name: Option<String>,
    pub age: Option<u32>,
    #[serde(alias = "phoneNumber")]
    pub phone: Option<String>,
    pub village: Option<String>,
    pub blood_group: Option<String>,
    pub previous_pregnancies: Option<u32>,
    pub notes: Option<String>,
    pub vaccinations: Option<Vec<String>>,
    pub complications: Option<Vec<String>>,
    pub medications: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckupInput {
    pub date: Option<NaiveDate>,
    pub weight: Option<f64>,
    pub blood_pressure: Option<String>,
    pub notes: Option<String>,
    pub next_checkup_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleProgressInput {
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSymptomCheckInput {
    pub user_id: Option<AnonymousId>,
    /// Option key (`fever`) or label (`জ্বর`) at the root question.
    pub symptom: String,
    /// Option key or label at the follow-up question.
    #[serde(alias = "duration")]
    pub answer: String,
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct WalkInput {
    #[serde(default)]
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHealthCenterInput {
    pub name: String,
    #[serde(rename = "type")]
    pub center_type: String,
    pub division: String,
    pub district: String,
    pub upazila: String,
    #[serde(alias = "location_description")]
    pub location_description: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub timing: Option<String>,
    pub contact: Option<String>,
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub is_emergency: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHealthCenterInput {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub center_type: Option<String>,
    pub division: Option<String>,
    pub district: Option<String>,
    pub upazila: Option<String>,
    #[serde(alias = "location_description")]
    pub location_description: Option<String>,
    pub services: Option<Vec<String>>,
    pub timing: Option<String>,
    pub contact: Option<String>,
    pub location: Option<GeoPoint>,
    pub is_emergency: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct HealthCenterFilter {
    #[serde(rename = "type")]
    pub center_type: Option<String>,
    pub is_emergency: Option<bool>,
}

impl HealthCenterFilter {
    pub fn matches(&self, center: &HealthCenter) -> bool {
        self.center_type
            .as_deref()
            .is_none_or(|center_type| center.center_type == center_type)
            && self
                .is_emergency
                .is_none_or(|is_emergency| center.is_emergency == is_emergency)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NearbyQuery {
    /// Search radius in metres.
    pub distance: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateHealthTipInput {
    pub title: String,
    pub description: String,
    pub category: String,
    pub season: Option<String>,
    pub icon: Option<String>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateHealthTipInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub season: Option<String>,
    pub icon: Option<String>,
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HealthTipFilter {
    pub category: Option<String>,
    pub language: Option<Language>,
}

impl HealthTipFilter {
    pub fn matches(&self, tip: &HealthTip) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| tip.category == category)
            && self.language.is_none_or(|language| tip.language == language)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkerInput {
    pub name: String,
    pub gender: Option<Gender>,
    pub role: String,
    pub area: String,
    pub contact: String,
    #[serde(alias = "trained_by")]
    pub trained_by: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    pub email: Option<String>,
    pub location: Option<GeoPoint>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkerInput {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub role: Option<String>,
    pub area: Option<String>,
    pub contact: Option<String>,
    #[serde(alias = "trained_by")]
    pub trained_by: Option<String>,
    pub specialties: Option<Vec<String>>,
    pub email: Option<String>,
    pub location: Option<GeoPoint>,
    pub availability: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WorkerFilter {
    /// Case-insensitive substring of the worker's area.
    pub area: Option<String>,
    /// Case-insensitive substring of any specialty.
    pub specialization: Option<String>,
    pub availability: Option<String>,
}

impl WorkerFilter {
    pub fn matches(&self, worker: &Worker) -> bool {
        let area = self
            .area
            .as_deref()
            .is_none_or(|area| contains_ignore_case(&worker.area, area));
        let specialization = self.specialization.as_deref().is_none_or(|wanted| {
            worker
                .specialties
                .iter()
                .any(|specialty| contains_ignore_case(specialty, wanted))
        });
        let availability = self
            .availability
            .as_deref()
            .is_none_or(|availability| worker.availability == availability);
        area && specialization && availability
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateEventInput {
    pub title: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    #[serde(default)]
    pub services: Vec<String>,
    pub organizer: String,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateEventInput {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub services: Option<Vec<String>>,
    pub organizer: Option<String>,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct EventFilter {
    /// Only events dated today or later.
    pub upcoming: Option<bool>,
}

impl EventFilter {
    pub fn matches(&self, event: &HealthEvent, today: NaiveDate) -> bool {
        match self.upcoming {
            Some(true) => event.date >= today,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ticket::TicketCode;
    use crate::types::ids::HelpRequestId;

    fn request(status: HelpStatus, urgency: Urgency, request_type: RequestType) -> HelpRequest {
        let now = Utc::now();
        HelpRequest {
            id: HelpRequestId::generate(),
            ticket_code: TicketCode::from_parts(0, 0, 100).unwrap(),
            name: "রহিম".to_string(),
            phone: "01712345678".to_string(),
            location: "মিরপুর".to_string(),
            request_type,
            description: "জ্বর".to_string(),
            urgency,
            status,
            response: None,
            assigned_worker: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn worker(area: &str, specialties: &[&str]) -> Worker {
        let now = Utc::now();
        Worker {
            id: WorkerId::generate(),
            name: "সালমা".to_string(),
            gender: None,
            role: "CHW".to_string(),
            area: area.to_string(),
            contact: "017".to_string(),
            trained_by: None,
            specialties: specialties.iter().map(ToString::to_string).collect(),
            email: None,
            location: None,
            availability: "Available".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn empty_help_filter_matches_everything() {
        let filter = HelpRequestFilter::default();
        assert!(filter.matches(&request(
            HelpStatus::Completed,
            Urgency::Low,
            RequestType::Other
        )));
    }

    #[test]
    fn combined_help_filters_intersect() {
        let filter = HelpRequestFilter {
            status: Some(HelpStatus::Pending),
            urgency: Some(Urgency::High),
            request_type: None,
        };
        assert!(filter.matches(&request(
            HelpStatus::Pending,
            Urgency::High,
            RequestType::Transport
        )));
        assert!(!filter.matches(&request(
            HelpStatus::Pending,
            Urgency::Low,
            RequestType::Transport
        )));
        assert!(!filter.matches(&request(
            HelpStatus::Assigned,
            Urgency::High,
            RequestType::Transport
        )));
    }

    #[test]
    fn help_filter_reads_kebab_case_status() {
        let filter: HelpRequestFilter =
            serde_json::from_str(r#"{"status":"in-progress","requestType":"transport"}"#).unwrap();
        assert_eq!(filter.status, Some(HelpStatus::InProgress));
        assert_eq!(filter.request_type, Some(RequestType::Transport));
    }

    #[test]
    fn worker_filter_is_case_insensitive_substring() {
        let filter = WorkerFilter {
            area: Some("mirpur".to_string()),
            specialization: Some("MATERNAL".to_string()),
            availability: None,
        };
        assert!(filter.matches(&worker("Mirpur, Dhaka", &["Maternal care"])));
        assert!(!filter.matches(&worker("Savar", &["Maternal care"])));
        assert!(!filter.matches(&worker("Mirpur", &["Nutrition"])));
    }

    #[test]
    fn upcoming_event_filter_keeps_today() {
        let today = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        let now = Utc::now();
        let mut event = HealthEvent {
            id: crate::types::ids::EventId::generate(),
            title: "স্বাস্থ্য ক্যাম্প".to_string(),
            date: today,
            time: "10:00".to_string(),
            location: "স্কুল মাঠ".to_string(),
            services: Vec::new(),
            organizer: "UHC".to_string(),
            icon: "📅".to_string(),
            created_at: now,
            updated_at: now,
        };
        let filter = EventFilter {
            upcoming: Some(true),
        };
        assert!(filter.matches(&event, today));
        event.date = today.pred_opt().unwrap();
        assert!(!filter.matches(&event, today));
        assert!(EventFilter::default().matches(&event, today));
    }

    #[test]
    fn maternal_input_accepts_lmp_alias() {
        let input: CreateMaternalRecordInput =
            serde_json::from_str(r#"{"lmp":"2025-01-01","motherName":"ফাতিমা","phoneNumber":"017"}"#)
                .unwrap();
        assert_eq!(input.lmp_date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(input.profile.mother_name.as_deref(), Some("ফাতিমা"));
        assert_eq!(input.profile.phone.as_deref(), Some("017"));
    }

    #[test]
    fn symptom_input_accepts_duration_alias() {
        let input: CreateSymptomCheckInput =
            serde_json::from_str(r#"{"symptom":"fever","duration":"৩ দিনের বেশি"}"#).unwrap();
        assert_eq!(input.answer, "৩ দিনের বেশি");
        assert!(input.user_id.is_none());
    }
}
