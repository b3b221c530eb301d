use crate::error::HelpError;
use crate::ticket::TicketCode;
use crate::types::{HelpRequest, HelpRequestFilter, HelpRequestId, StatusCount};
use chrono::{DateTime, Utc};

pub trait HelpRepository {
    /// Fails with [`HelpError::TicketCodeTaken`] when the code is already stored.
    fn insert(&self, request: &HelpRequest) -> Result<(), HelpError>;
    fn get(&self, id: &HelpRequestId) -> Result<Option<HelpRequest>, HelpError>;
    fn get_by_code(&self, code: &TicketCode) -> Result<Option<HelpRequest>, HelpError>;
    /// Newest first.
    fn list(&self, filter: &HelpRequestFilter) -> Result<Vec<HelpRequest>, HelpError>;
    fn replace(&self, request: &HelpRequest) -> Result<(), HelpError>;
    fn delete(&self, id: &HelpRequestId) -> Result<bool, HelpError>;
    fn count(&self) -> Result<u64, HelpError>;
    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, HelpError>;
    fn count_by_status(&self) -> Result<Vec<StatusCount>, HelpError>;
}
