use crate::error::{MonBondhuError, RecordError};
use crate::mon_bondhu::MonBondhu;
use crate::records::{MaternalRecordRepository, MentalRecordRepository, SymptomCheckRepository};
use crate::schedule::{pregnancy_anchor, schedule_for};
use crate::store::Store;
use crate::symptom_tree;
use crate::types::{
    Anchor, Checkup, CheckupInput, CreateMaternalRecordInput, CreateMentalRecordInput,
    CreateSymptomCheckInput, MaternalRecord, MaternalRecordId, MentalHealthRecord,
    MentalRecordId, ScheduleProgressInput, SymptomCheck, SymptomCheckId, TrackingType,
    UpdateMaternalRecordInput, UpdateMentalRecordInput, UserFilter,
};
use crate::validation::{Invalid, not_in_future, validate_mood_level};
use chrono::{DateTime, Utc};

const RECORD: &str = "Record";
const CHECK: &str = "Check";

/// Oldest age accepted on a symptom check.
pub const MAX_AGE: u32 = 120;

pub struct MentalHealthApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> MentalHealthApi<'_, S> {
    pub fn create(
        &self,
        input: CreateMentalRecordInput,
    ) -> Result<MentalHealthRecord, MonBondhuError> {
        if input.mood.is_none() && input.mood_level.is_none() {
            return Err(RecordError::invalid("mood or moodLevel is required").into());
        }
        if let Some(level) = input.mood_level {
            validate_mood_level(level).map_err(RecordError::from)?;
        }
        let now = Utc::now();
        let record = MentalHealthRecord {
            id: MentalRecordId::generate(),
            user_id: input.user_id.unwrap_or_default(),
            mood: input.mood,
            mood_level: input.mood_level,
            activities: input.activities,
            notes: input.notes,
            date: input.date.unwrap_or(now),
            created_at: now,
            updated_at: now,
        };
        self.core.store().mental().insert(&record)?;
        Ok(record)
    }

    pub fn get(&self, id: &MentalRecordId) -> Result<MentalHealthRecord, MonBondhuError> {
        Ok(self
            .core
            .store()
            .mental()
            .get(id)?
            .ok_or(RecordError::NotFound { kind: RECORD })?)
    }

    pub fn list(&self, filter: &UserFilter) -> Result<Vec<MentalHealthRecord>, MonBondhuError> {
        Ok(self.core.store().mental().list(filter)?)
    }

    pub fn update(
        &self,
        id: &MentalRecordId,
        input: UpdateMentalRecordInput,
    ) -> Result<MentalHealthRecord, MonBondhuError> {
        if let Some(level) = input.mood_level {
            validate_mood_level(level).map_err(RecordError::from)?;
        }
        self.core.with_tx(|store| {
            let mut record = store
                .mental()
                .get(id)?
                .ok_or(RecordError::NotFound { kind: RECORD })?;
            if input.mood.is_some() {
                record.mood = input.mood;
            }
            if input.mood_level.is_some() {
                record.mood_level = input.mood_level;
            }
            if let Some(activities) = input.activities {
                record.activities = activities;
            }
            if input.notes.is_some() {
                record.notes = input.notes;
            }
            record.updated_at = Utc::now();
            store.mental().replace(&record)?;
            Ok(record)
        })
    }

    pub fn delete(&self, id: &MentalRecordId) -> Result<(), MonBondhuError> {
        if self.core.store().mental().delete(id)? {
            Ok(())
        } else {
            Err(RecordError::NotFound { kind: RECORD }.into())
        }
    }
}

pub struct MaternalHealthApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> MaternalHealthApi<'_, S> {
    /// Creates a record and derives its reminder schedule from the anchor
    /// date. The schedule never changes after this point.
    pub fn create(
        &self,
        input: CreateMaternalRecordInput,
    ) -> Result<MaternalRecord, MonBondhuError> {
        self.create_at(input, Utc::now())
    }

    /// `create` as of `now`. Anchor dates are checked against the local day.
    pub fn create_at(
        &self,
        input: CreateMaternalRecordInput,
        now: DateTime<Utc>,
    ) -> Result<MaternalRecord, MonBondhuError> {
        let today = self.core.calendar().date_at(now);
        let anchor = match input.tracking_type.unwrap_or_default() {
            TrackingType::Pregnancy => {
                let lmp = input.lmp_date.ok_or_else(|| {
                    RecordError::invalid("lmpDate is required for pregnancy tracking")
                })?;
                not_in_future("lmpDate", lmp, today).map_err(RecordError::from)?;
                pregnancy_anchor(lmp)
            }
            TrackingType::Child => {
                let birth_date = input.birth_date.ok_or_else(|| {
                    RecordError::invalid("birthDate is required for child tracking")
                })?;
                not_in_future("birthDate", birth_date, today).map_err(RecordError::from)?;
                Anchor::Child { birth_date }
            }
        };
        let record = MaternalRecord {
            id: MaternalRecordId::generate(),
            user_id: input.user_id.unwrap_or_default(),
            schedule: schedule_for(&anchor),
            anchor,
            checkups: Vec::new(),
            profile: input.profile,
            created_at: now,
            updated_at: now,
        };
        self.core.store().maternal().insert(&record)?;
        Ok(record)
    }

    pub fn get(&self, id: &MaternalRecordId) -> Result<MaternalRecord, MonBondhuError> {
        Ok(self
            .core
            .store()
            .maternal()
            .get(id)?
            .ok_or(RecordError::NotFound { kind: RECORD })?)
    }

    pub fn list(&self, filter: &UserFilter) -> Result<Vec<MaternalRecord>, MonBondhuError> {
        Ok(self.core.store().maternal().list(filter)?)
    }

    pub fn update(
        &self,
        id: &MaternalRecordId,
        input: UpdateMaternalRecordInput,
    ) -> Result<MaternalRecord, MonBondhuError> {
        self.modify(id, |record| {
            let profile = &mut record.profile;
            if input.mother_name.is_some() {
                profile.mother_name = input.mother_name;
            }
            if input.age.is_some() {
                profile.age = input.age;
            }
            if input.phone.is_some() {
                profile.phone = input.phone;
            }
            if input.village.is_some() {
                profile.village = input.village;
            }
            if input.blood_group.is_some() {
                profile.blood_group = input.blood_group;
            }
            if input.previous_pregnancies.is_some() {
                profile.previous_pregnancies = input.previous_pregnancies;
            }
            if input.notes.is_some() {
                profile.notes = input.notes;
            }
            if let Some(vaccinations) = input.vaccinations {
                profile.vaccinations = vaccinations;
            }
            if let Some(complications) = input.complications {
                profile.complications = complications;
            }
            if let Some(medications) = input.medications {
                profile.medications = medications;
            }
            Ok(())
        })
    }

    pub fn add_checkup(
        &self,
        id: &MaternalRecordId,
        input: CheckupInput,
    ) -> Result<MaternalRecord, MonBondhuError> {
        if input.weight.is_some_and(|weight| !weight.is_finite() || weight <= 0.0) {
            return Err(RecordError::invalid("weight must be a positive number").into());
        }
        let date = input.date.unwrap_or_else(|| self.core.calendar().today());
        self.modify(id, |record| {
            record.checkups.push(Checkup {
                date,
                weight: input.weight,
                blood_pressure: input.blood_pressure,
                notes: input.notes,
                next_checkup_date: input.next_checkup_date,
            });
            Ok(())
        })
    }

    /// Marks one schedule entry done or not done. Only the flag changes.
    pub fn set_schedule_progress(
        &self,
        id: &MaternalRecordId,
        index: usize,
        input: ScheduleProgressInput,
    ) -> Result<MaternalRecord, MonBondhuError> {
        self.modify(id, |record| {
            let entry = record
                .schedule
                .get_mut(index)
                .ok_or(RecordError::ScheduleEntryNotFound { index })?;
            entry.completed = input.completed;
            Ok(())
        })
    }

    pub fn delete(&self, id: &MaternalRecordId) -> Result<(), MonBondhuError> {
        if self.core.store().maternal().delete(id)? {
            Ok(())
        } else {
            Err(RecordError::NotFound { kind: RECORD }.into())
        }
    }

    fn modify<F>(&self, id: &MaternalRecordId, f: F) -> Result<MaternalRecord, MonBondhuError>
    where
        F: FnOnce(&mut MaternalRecord) -> Result<(), RecordError>,
    {
        self.core.with_tx(|store| {
            let mut record = store
                .maternal()
                .get(id)?
                .ok_or(RecordError::NotFound { kind: RECORD })?;
            f(&mut record)?;
            record.updated_at = Utc::now();
            store.maternal().replace(&record)?;
            Ok(record)
        })
    }
}

pub struct SymptomChecksApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> SymptomChecksApi<'_, S> {
    /// Runs the answers through the tree and stores the outcome.
    pub fn create(&self, input: CreateSymptomCheckInput) -> Result<SymptomCheck, MonBondhuError> {
        if input.age.is_some_and(|age| age > MAX_AGE) {
            return Err(RecordError::from(Invalid(format!(
                "age must be between 0 and {MAX_AGE}"
            )))
            .into());
        }
        let outcome = symptom_tree::evaluate(&input.symptom, &input.answer)?;
        let now = Utc::now();
        let check = SymptomCheck {
            id: SymptomCheckId::generate(),
            user_id: input.user_id.unwrap_or_default(),
            symptom: outcome.symptom,
            sub_question: outcome.sub_question,
            answer: outcome.answer,
            age: input.age,
            result: outcome.verdict,
            check_date: now,
            created_at: now,
        };
        self.core.store().symptom_checks().insert(&check)?;
        Ok(check)
    }

    pub fn get(&self, id: &SymptomCheckId) -> Result<SymptomCheck, MonBondhuError> {
        Ok(self
            .core
            .store()
            .symptom_checks()
            .get(id)?
            .ok_or(RecordError::NotFound { kind: CHECK })?)
    }

    pub fn list(&self, filter: &UserFilter) -> Result<Vec<SymptomCheck>, MonBondhuError> {
        Ok(self.core.store().symptom_checks().list(filter)?)
    }

    pub fn delete(&self, id: &SymptomCheckId) -> Result<(), MonBondhuError> {
        if self.core.store().symptom_checks().delete(id)? {
            Ok(())
        } else {
            Err(RecordError::NotFound { kind: CHECK }.into())
        }
    }
}
