use crate::types::enums::Severity;
use crate::types::ids::{AnonymousId, SymptomCheckId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Terminal outcome of a decision-tree walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    pub icon: String,
}

/// A completed walk, stored once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymptomCheck {
    pub id: SymptomCheckId,
    pub user_id: AnonymousId,
    pub symptom: String,
    pub sub_question: String,
    pub answer: String,
    pub age: Option<u32>,
    pub result: Verdict,
    pub check_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChoiceView {
    pub key: String,
    pub label: String,
    pub icon: String,
}

/// One step of an interview: either the next question to ask or the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WalkStep {
    Question {
        key: String,
        prompt: String,
        options: Vec<ChoiceView>,
    },
    Result {
        verdict: Verdict,
    },
}
