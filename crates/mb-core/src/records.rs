use crate::error::RecordError;
use crate::types::{
    MaternalRecord, MaternalRecordId, MentalHealthRecord, MentalRecordId, MoodCount,
    SymptomCheck, SymptomCheckId, UserFilter,
};
use chrono::{DateTime, Utc};

pub trait MentalRecordRepository {
    fn insert(&self, record: &MentalHealthRecord) -> Result<(), RecordError>;
    fn get(&self, id: &MentalRecordId) -> Result<Option<MentalHealthRecord>, RecordError>;
    /// Ordered by check-in date, newest first.
    fn list(&self, filter: &UserFilter) -> Result<Vec<MentalHealthRecord>, RecordError>;
    fn replace(&self, record: &MentalHealthRecord) -> Result<(), RecordError>;
    fn delete(&self, id: &MentalRecordId) -> Result<bool, RecordError>;
    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RecordError>;
    fn mood_distribution(&self) -> Result<Vec<MoodCount>, RecordError>;
}

pub trait MaternalRecordRepository {
    fn insert(&self, record: &MaternalRecord) -> Result<(), RecordError>;
    fn get(&self, id: &MaternalRecordId) -> Result<Option<MaternalRecord>, RecordError>;
    fn list(&self, filter: &UserFilter) -> Result<Vec<MaternalRecord>, RecordError>;
    fn replace(&self, record: &MaternalRecord) -> Result<(), RecordError>;
    fn delete(&self, id: &MaternalRecordId) -> Result<bool, RecordError>;
    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RecordError>;
}

/// Symptom checks are immutable once stored.
pub trait SymptomCheckRepository {
    fn insert(&self, check: &SymptomCheck) -> Result<(), RecordError>;
    fn get(&self, id: &SymptomCheckId) -> Result<Option<SymptomCheck>, RecordError>;
    fn list(&self, filter: &UserFilter) -> Result<Vec<SymptomCheck>, RecordError>;
    fn delete(&self, id: &SymptomCheckId) -> Result<bool, RecordError>;
}
