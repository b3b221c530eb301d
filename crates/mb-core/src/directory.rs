use crate::error::DirectoryError;
use crate::types::{
    EventFilter, EventId, HealthCenter, HealthCenterFilter, HealthCenterId, HealthEvent,
    HealthTip, HealthTipFilter, HealthTipId, Worker, WorkerFilter, WorkerId,
};
use chrono::NaiveDate;

pub trait HealthCenterRepository {
    fn insert(&self, center: &HealthCenter) -> Result<(), DirectoryError>;
    fn get(&self, id: &HealthCenterId) -> Result<Option<HealthCenter>, DirectoryError>;
    fn list(&self, filter: &HealthCenterFilter) -> Result<Vec<HealthCenter>, DirectoryError>;
    fn replace(&self, center: &HealthCenter) -> Result<(), DirectoryError>;
    fn delete(&self, id: &HealthCenterId) -> Result<bool, DirectoryError>;
    fn count(&self) -> Result<u64, DirectoryError>;
}

pub trait HealthTipRepository {
    fn insert(&self, tip: &HealthTip) -> Result<(), DirectoryError>;
    fn get(&self, id: &HealthTipId) -> Result<Option<HealthTip>, DirectoryError>;
    fn list(&self, filter: &HealthTipFilter) -> Result<Vec<HealthTip>, DirectoryError>;
    fn replace(&self, tip: &HealthTip) -> Result<(), DirectoryError>;
    fn delete(&self, id: &HealthTipId) -> Result<bool, DirectoryError>;
}

pub trait WorkerRepository {
    fn insert(&self, worker: &Worker) -> Result<(), DirectoryError>;
    fn get(&self, id: &WorkerId) -> Result<Option<Worker>, DirectoryError>;
    fn list(&self, filter: &WorkerFilter) -> Result<Vec<Worker>, DirectoryError>;
    fn replace(&self, worker: &Worker) -> Result<(), DirectoryError>;
    fn delete(&self, id: &WorkerId) -> Result<bool, DirectoryError>;
    fn count(&self) -> Result<u64, DirectoryError>;
}

pub trait EventRepository {
    fn insert(&self, event: &HealthEvent) -> Result<(), DirectoryError>;
    fn get(&self, id: &EventId) -> Result<Option<HealthEvent>, DirectoryError>;
    /// Ordered by event date, earliest first.
    fn list(&self, filter: &EventFilter, today: NaiveDate)
    -> Result<Vec<HealthEvent>, DirectoryError>;
    fn replace(&self, event: &HealthEvent) -> Result<(), DirectoryError>;
    fn delete(&self, id: &EventId) -> Result<bool, DirectoryError>;
    fn count(&self) -> Result<u64, DirectoryError>;
    fn count_from(&self, date: NaiveDate) -> Result<u64, DirectoryError>;
}
