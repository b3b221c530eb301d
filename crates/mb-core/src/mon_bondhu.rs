use crate::calendar::Calendar;
use crate::directory::{EventRepository, HealthCenterRepository, WorkerRepository};
use crate::error::{DirectoryError, HelpError, MonBondhuError};
use crate::help::HelpRepository;
use crate::records::{MaternalRecordRepository, MentalRecordRepository};
use crate::store::Store;
use crate::ticket::{CodeSource, MAX_TICKET_ATTEMPTS, RandomCodes, TicketCode};
use crate::types::{
    AssignWorkerInput, DashboardStatistics, HelpRequest, HelpRequestDetail, HelpRequestFilter,
    HelpRequestId, HelpStatus, HelpStatusInput, SubmitHelpRequestInput, UpdateHelpRequestInput,
    WorkerId,
};
use crate::validation::{optional_text, patch_text, required_text};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

/// Length of the trailing statistics window.
pub const STATISTICS_WINDOW_DAYS: i64 = 7;

pub struct MonBondhu<S: Store> {
    store: S,
    calendar: Calendar,
}

impl<S: Store> MonBondhu<S> {
    pub fn new(store: S) -> Self {
        Self::with_calendar(store, Calendar::default())
    }

    pub fn with_calendar(store: S, calendar: Calendar) -> Self {
        Self { store, calendar }
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn help_requests(&self) -> HelpRequestsApi<'_, S> {
        HelpRequestsApi { core: self }
    }

    pub fn mental_health(&self) -> crate::records_api::MentalHealthApi<'_, S> {
        crate::records_api::MentalHealthApi { core: self }
    }

    pub fn maternal_health(&self) -> crate::records_api::MaternalHealthApi<'_, S> {
        crate::records_api::MaternalHealthApi { core: self }
    }

    pub fn symptom_checks(&self) -> crate::records_api::SymptomChecksApi<'_, S> {
        crate::records_api::SymptomChecksApi { core: self }
    }

    pub fn health_centers(&self) -> crate::directory_api::HealthCentersApi<'_, S> {
        crate::directory_api::HealthCentersApi { core: self }
    }

    pub fn health_tips(&self) -> crate::directory_api::HealthTipsApi<'_, S> {
        crate::directory_api::HealthTipsApi { core: self }
    }

    pub fn workers(&self) -> crate::directory_api::WorkersApi<'_, S> {
        crate::directory_api::WorkersApi { core: self }
    }

    pub fn events(&self) -> crate::directory_api::EventsApi<'_, S> {
        crate::directory_api::EventsApi { core: self }
    }

    pub fn statistics(&self) -> StatisticsApi<'_, S> {
        StatisticsApi { core: self }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn with_tx<T, F>(&self, f: F) -> Result<T, MonBondhuError>
    where
        F: FnOnce(&S) -> Result<T, MonBondhuError>,
    {
        self.store.with_tx(f)
    }
}

pub struct HelpRequestsApi<'a, S: Store> {
    core: &'a MonBondhu<S>,
}

impl<S: Store> HelpRequestsApi<'_, S> {
    pub fn submit(&self, input: SubmitHelpRequestInput) -> Result<HelpRequest, MonBondhuError> {
        self.submit_with(&mut RandomCodes::thread(), input)
    }

    /// Submits with codes drawn from `codes`, retrying while the store
    /// reports the drawn code as taken.
    pub fn submit_with<C: CodeSource>(
        &self,
        codes: &mut C,
        input: SubmitHelpRequestInput,
    ) -> Result<HelpRequest, MonBondhuError> {
        let now = Utc::now();
        let mut request = HelpRequest {
            id: HelpRequestId::generate(),
            ticket_code: codes.next_code(),
            name: required_text("name", &input.name).map_err(HelpError::from)?,
            phone: required_text("phone", &input.phone).map_err(HelpError::from)?,
            location: required_text("location", &input.location).map_err(HelpError::from)?,
            request_type: input.request_type,
            description: required_text("description", &input.description)
                .map_err(HelpError::from)?,
            urgency: input.urgency.unwrap_or_default(),
            status: HelpStatus::Pending,
            response: None,
            assigned_worker: None,
            created_at: now,
            updated_at: now,
        };
        let help = self.core.store.help();
        for attempt in 1..=MAX_TICKET_ATTEMPTS {
            match help.insert(&request) {
                Ok(()) => {
                    info!(
                        id = %request.id,
                        ticket_code = %request.ticket_code,
                        urgency = ?request.urgency,
                        "help request submitted"
                    );
                    return Ok(request);
                }
                Err(HelpError::TicketCodeTaken) => {
                    warn!(
                        attempt,
                        ticket_code = %request.ticket_code,
                        "ticket code collision, drawing another"
                    );
                    request.ticket_code = codes.next_code();
                }
                Err(err) => return Err(err.into()),
            }
        }
        Err(HelpError::TicketCodesExhausted {
            attempts: MAX_TICKET_ATTEMPTS,
        }
        .into())
    }

    pub fn get(&self, id: &HelpRequestId) -> Result<HelpRequestDetail, MonBondhuError> {
        let request = self
            .core
            .store
            .help()
            .get(id)?
            .ok_or(HelpError::NotFound)?;
        self.detail(request)
    }

    /// Looks a request up by the code its submitter wrote down. Anything
    /// that is not a well-formed, stored code is simply not found.
    pub fn get_by_code(&self, code: &str) -> Result<HelpRequestDetail, MonBondhuError> {
        let code = TicketCode::parse(code.trim()).map_err(|_| HelpError::TicketNotFound)?;
        let request = self
            .core
            .store
            .help()
            .get_by_code(&code)?
            .ok_or(HelpError::TicketNotFound)?;
        self.detail(request)
    }

    pub fn list(&self, filter: &HelpRequestFilter) -> Result<Vec<HelpRequest>, MonBondhuError> {
        Ok(self.core.store.help().list(filter)?)
    }

    pub fn update(
        &self,
        id: &HelpRequestId,
        input: UpdateHelpRequestInput,
    ) -> Result<HelpRequest, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut request = store.help().get(id)?.ok_or(HelpError::NotFound)?;
            patch_text(&mut request.name, "name", input.name.as_deref()).map_err(HelpError::from)?;
            patch_text(&mut request.phone, "phone", input.phone.as_deref())
                .map_err(HelpError::from)?;
            patch_text(&mut request.location, "location", input.location.as_deref())
                .map_err(HelpError::from)?;
            patch_text(
                &mut request.description,
                "description",
                input.description.as_deref(),
            )
            .map_err(HelpError::from)?;
            if let Some(request_type) = input.request_type {
                request.request_type = request_type;
            }
            if let Some(urgency) = input.urgency {
                request.urgency = urgency;
            }
            if let Some(status) = input.status {
                request.status = status;
            }
            if let Some(response) = optional_text(input.response.as_deref()) {
                request.response = Some(response);
            }
            if let Some(worker_id) = input.assigned_worker {
                require_worker(store, &worker_id)?;
                request.assigned_worker = Some(worker_id);
            }
            request.updated_at = Utc::now();
            store.help().replace(&request)?;
            Ok(request)
        })
    }

    /// Overwrites the status unconditionally. Any status may follow any other.
    /// A worker named here must exist.
    pub fn update_status(
        &self,
        id: &HelpRequestId,
        input: HelpStatusInput,
    ) -> Result<HelpRequest, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut request = store.help().get(id)?.ok_or(HelpError::NotFound)?;
            request.status = input.status;
            if let Some(response) = optional_text(input.response.as_deref()) {
                request.response = Some(response);
            }
            if let Some(worker_id) = input.assigned_worker {
                require_worker(store, &worker_id)?;
                request.assigned_worker = Some(worker_id);
            }
            request.updated_at = Utc::now();
            store.help().replace(&request)?;
            info!(id = %request.id, status = ?request.status, "help request status changed");
            Ok(request)
        })
    }

    pub fn assign(
        &self,
        id: &HelpRequestId,
        input: AssignWorkerInput,
    ) -> Result<HelpRequestDetail, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut request = store.help().get(id)?.ok_or(HelpError::NotFound)?;
            let worker = require_worker(store, &input.worker_id)?;
            request.assigned_worker = Some(input.worker_id);
            request.status = HelpStatus::Assigned;
            request.updated_at = Utc::now();
            store.help().replace(&request)?;
            info!(id = %request.id, worker = %worker.id, "worker assigned to help request");
            Ok(HelpRequestDetail {
                request,
                worker: Some(worker),
            })
        })
    }

    pub fn delete(&self, id: &HelpRequestId) -> Result<(), MonBondhuError> {
        if self.core.store.help().delete(id)? {
            Ok(())
        } else {
            Err(HelpError::NotFound.into())
        }
    }

    fn detail(&self, request: HelpRequest) -> Result<HelpRequestDetail, MonBondhuError> {
        let worker = match &request.assigned_worker {
            Some(worker_id) => self.core.store.workers().get(worker_id)?,
            None => None,
        };
        Ok(HelpRequestDetail { request, worker })
    }
}

fn require_worker<S: Store>(
    store: &S,
    id: &WorkerId,
) -> Result<crate::types::Worker, MonBondhuError> {
    store
        .workers()
        .get(id)?
        .ok_or_else(|| DirectoryError::NotFound { kind: "Worker" }.into())
}

pub struct StatisticsApi<'a, S: Store> {
    core: &'a MonBondhu<S>,
}

impl<S: Store> StatisticsApi<'_, S> {
    pub fn dashboard(&self) -> Result<DashboardStatistics, MonBondhuError> {
        self.dashboard_at(Utc::now())
    }

    /// Aggregates over the seven days ending at `now`, all read in one
    /// transaction so the counts agree with each other.
    pub fn dashboard_at(&self, now: DateTime<Utc>) -> Result<DashboardStatistics, MonBondhuError> {
        let window_start = now - Duration::days(STATISTICS_WINDOW_DAYS);
        let today = self.core.calendar.date_at(now);
        self.core.with_tx(|store| {
            let mental_health_checkins = store.mental().count_since(window_start)?;
            let maternal_health_checkins = store.maternal().count_since(window_start)?;
            Ok(DashboardStatistics {
                total_checkins_this_week: mental_health_checkins + maternal_health_checkins,
                mental_health_checkins,
                maternal_health_checkins,
                total_health_centers: store.centers().count()?,
                total_help_requests: store.help().count()?,
                help_requests_this_week: store.help().count_since(window_start)?,
                total_events: store.events().count()?,
                upcoming_events: store.events().count_from(today)?,
                total_workers: store.workers().count()?,
                help_requests_by_status: store.help().count_by_status()?,
                mood_distribution: store.mental().mood_distribution()?,
                window_start,
                generated_at: now,
            })
        })
    }
}
