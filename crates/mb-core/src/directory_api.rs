use crate::directory::{
    EventRepository, HealthCenterRepository, HealthTipRepository, WorkerRepository,
};
use crate::error::{DirectoryError, MonBondhuError};
use crate::geo::{DEFAULT_NEARBY_METERS, haversine_meters, is_valid};
use crate::mon_bondhu::MonBondhu;
use crate::store::Store;
use crate::types::{
    CreateEventInput, CreateHealthCenterInput, CreateHealthTipInput, CreateWorkerInput, EventFilter,
    EventId, GeoPoint, HealthCenter, HealthCenterFilter, HealthCenterId, HealthEvent, HealthTip,
    HealthTipFilter, HealthTipId, NearbyHealthCenter, NearbyQuery, UpdateEventInput,
    UpdateHealthCenterInput, UpdateHealthTipInput, UpdateWorkerInput, Worker, WorkerFilter,
    WorkerId,
};
use crate::validation::{Invalid, optional_text, patch_text, required_text};
use chrono::Utc;

pub const DEFAULT_TIMING: &str = "২৪ ঘণ্টা";
pub const DEFAULT_SEASON: &str = "সারা বছর";
pub const DEFAULT_TIP_ICON: &str = "💡";
pub const DEFAULT_EVENT_ICON: &str = "📅";
pub const DEFAULT_AVAILABILITY: &str = "Available";

const CENTER: &str = "Health center";
const TIP: &str = "Health tip";
const WORKER: &str = "Worker";
const EVENT: &str = "Event";

fn check_location(location: Option<GeoPoint>) -> Result<(), Invalid> {
    match location {
        Some(point) if !is_valid(point) => Err(Invalid(
            "location must have lat in [-90, 90] and lng in [-180, 180]".to_string(),
        )),
        _ => Ok(()),
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    optional_text(value).unwrap_or_else(|| default.to_string())
}

pub struct HealthCentersApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> HealthCentersApi<'_, S> {
    pub fn create(&self, input: CreateHealthCenterInput) -> Result<HealthCenter, MonBondhuError> {
        let center = build_center(input).map_err(DirectoryError::from)?;
        self.core.store().centers().insert(&center)?;
        Ok(center)
    }

    pub fn get(&self, id: &HealthCenterId) -> Result<HealthCenter, MonBondhuError> {
        Ok(self
            .core
            .store()
            .centers()
            .get(id)?
            .ok_or(DirectoryError::NotFound { kind: CENTER })?)
    }

    pub fn list(&self, filter: &HealthCenterFilter) -> Result<Vec<HealthCenter>, MonBondhuError> {
        Ok(self.core.store().centers().list(filter)?)
    }

    /// Centers with known coordinates within `query.distance` metres of
    /// `origin`, nearest first.
    pub fn nearby(
        &self,
        origin: GeoPoint,
        query: NearbyQuery,
    ) -> Result<Vec<NearbyHealthCenter>, MonBondhuError> {
        if !is_valid(origin) {
            return Err(DirectoryError::invalid(
                "lat must be in [-90, 90] and lng in [-180, 180]",
            )
            .into());
        }
        let radius = query.distance.unwrap_or(DEFAULT_NEARBY_METERS);
        if !radius.is_finite() || radius < 0.0 {
            return Err(DirectoryError::invalid("distance must be a non-negative number").into());
        }
        let centers = self
            .core
            .store()
            .centers()
            .list(&HealthCenterFilter::default())?;
        let mut nearby: Vec<NearbyHealthCenter> = centers
            .into_iter()
            .filter_map(|center| {
                let distance_meters = haversine_meters(origin, center.location?);
                (distance_meters <= radius).then_some(NearbyHealthCenter {
                    center,
                    distance_meters,
                })
            })
            .collect();
        nearby.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
        Ok(nearby)
    }

    pub fn update(
        &self,
        id: &HealthCenterId,
        input: UpdateHealthCenterInput,
    ) -> Result<HealthCenter, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut center = store
                .centers()
                .get(id)?
                .ok_or(DirectoryError::NotFound { kind: CENTER })?;
            apply_center_update(&mut center, input).map_err(DirectoryError::from)?;
            center.updated_at = Utc::now();
            store.centers().replace(&center)?;
            Ok(center)
        })
    }

    pub fn delete(&self, id: &HealthCenterId) -> Result<(), MonBondhuError> {
        if self.core.store().centers().delete(id)? {
            Ok(())
        } else {
            Err(DirectoryError::NotFound { kind: CENTER }.into())
        }
    }
}

fn build_center(input: CreateHealthCenterInput) -> Result<HealthCenter, Invalid> {
    check_location(input.location)?;
    let now = Utc::now();
    Ok(HealthCenter {
        id: HealthCenterId::generate(),
        name: required_text("name", &input.name)?,
        center_type: required_text("type", &input.center_type)?,
        division: required_text("division", &input.division)?,
        district: required_text("district", &input.district)?,
        upazila: required_text("upazila", &input.upazila)?,
        location_description: required_text(
            "locationDescription",
            &input.location_description,
        )?,
        services: input.services,
        timing: or_default(input.timing.as_deref(), DEFAULT_TIMING),
        contact: input.contact,
        location: input.location,
        is_emergency: input.is_emergency,
        created_at: now,
        updated_at: now,
    })
}

fn apply_center_update(
    center: &mut HealthCenter,
    input: UpdateHealthCenterInput,
) -> Result<(), Invalid> {
    check_location(input.location)?;
    patch_text(&mut center.name, "name", input.name.as_deref())?;
    patch_text(&mut center.center_type, "type", input.center_type.as_deref())?;
    patch_text(&mut center.division, "division", input.division.as_deref())?;
    patch_text(&mut center.district, "district", input.district.as_deref())?;
    patch_text(&mut center.upazila, "upazila", input.upazila.as_deref())?;
    patch_text(
        &mut center.location_description,
        "locationDescription",
        input.location_description.as_deref(),
    )?;
    patch_text(&mut center.timing, "timing", input.timing.as_deref())?;
    if let Some(services) = input.services {
        center.services = services;
    }
    if input.contact.is_some() {
        center.contact = input.contact;
    }
    if input.location.is_some() {
        center.location = input.location;
    }
    if let Some(is_emergency) = input.is_emergency {
        center.is_emergency = is_emergency;
    }
    Ok(())
}

pub struct HealthTipsApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> HealthTipsApi<'_, S> {
    pub fn create(&self, input: CreateHealthTipInput) -> Result<HealthTip, MonBondhuError> {
        let tip = build_tip(input).map_err(DirectoryError::from)?;
        self.core.store().tips().insert(&tip)?;
        Ok(tip)
    }

    pub fn get(&self, id: &HealthTipId) -> Result<HealthTip, MonBondhuError> {
        Ok(self
            .core
            .store()
            .tips()
            .get(id)?
            .ok_or(DirectoryError::NotFound { kind: TIP })?)
    }

    pub fn list(&self, filter: &HealthTipFilter) -> Result<Vec<HealthTip>, MonBondhuError> {
        Ok(self.core.store().tips().list(filter)?)
    }

    pub fn update(
        &self,
        id: &HealthTipId,
        input: UpdateHealthTipInput,
    ) -> Result<HealthTip, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut tip = store
                .tips()
                .get(id)?
                .ok_or(DirectoryError::NotFound { kind: TIP })?;
            apply_tip_update(&mut tip, input).map_err(DirectoryError::from)?;
            tip.updated_at = Utc::now();
            store.tips().replace(&tip)?;
            Ok(tip)
        })
    }

    pub fn delete(&self, id: &HealthTipId) -> Result<(), MonBondhuError> {
        if self.core.store().tips().delete(id)? {
            Ok(())
        } else {
            Err(DirectoryError::NotFound { kind: TIP }.into())
        }
    }
}

fn build_tip(input: CreateHealthTipInput) -> Result<HealthTip, Invalid> {
    let now = Utc::now();
    Ok(HealthTip {
        id: HealthTipId::generate(),
        title: required_text("title", &input.title)?,
        description: required_text("description", &input.description)?,
        category: required_text("category", &input.category)?,
        season: or_default(input.season.as_deref(), DEFAULT_SEASON),
        icon: or_default(input.icon.as_deref(), DEFAULT_TIP_ICON),
        language: input.language.unwrap_or_default(),
        created_at: now,
        updated_at: now,
    })
}

fn apply_tip_update(tip: &mut HealthTip, input: UpdateHealthTipInput) -> Result<(), Invalid> {
    patch_text(&mut tip.title, "title", input.title.as_deref())?;
    patch_text(&mut tip.description, "description", input.description.as_deref())?;
    patch_text(&mut tip.category, "category", input.category.as_deref())?;
    patch_text(&mut tip.season, "season", input.season.as_deref())?;
    patch_text(&mut tip.icon, "icon", input.icon.as_deref())?;
    if let Some(language) = input.language {
        tip.language = language;
    }
    Ok(())
}

pub struct WorkersApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> WorkersApi<'_, S> {
    pub fn create(&self, input: CreateWorkerInput) -> Result<Worker, MonBondhuError> {
        let worker = build_worker(input).map_err(DirectoryError::from)?;
        self.core.store().workers().insert(&worker)?;
        Ok(worker)
    }

    pub fn get(&self, id: &WorkerId) -> Result<Worker, MonBondhuError> {
        Ok(self
            .core
            .store()
            .workers()
            .get(id)?
            .ok_or(DirectoryError::NotFound { kind: WORKER })?)
    }

    pub fn list(&self, filter: &WorkerFilter) -> Result<Vec<Worker>, MonBondhuError> {
        Ok(self.core.store().workers().list(filter)?)
    }

    pub fn update(&self, id: &WorkerId, input: UpdateWorkerInput) -> Result<Worker, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut worker = store
                .workers()
                .get(id)?
                .ok_or(DirectoryError::NotFound { kind: WORKER })?;
            apply_worker_update(&mut worker, input).map_err(DirectoryError::from)?;
            worker.updated_at = Utc::now();
            store.workers().replace(&worker)?;
            Ok(worker)
        })
    }

    /// Help requests keep pointing at a deleted worker; lookups then
    /// resolve the worker to nothing.
    pub fn delete(&self, id: &WorkerId) -> Result<(), MonBondhuError> {
        if self.core.store().workers().delete(id)? {
            Ok(())
        } else {
            Err(DirectoryError::NotFound { kind: WORKER }.into())
        }
    }
}

fn build_worker(input: CreateWorkerInput) -> Result<Worker, Invalid> {
    check_location(input.location)?;
    let now = Utc::now();
    Ok(Worker {
        id: WorkerId::generate(),
        name: required_text("name", &input.name)?,
        gender: input.gender,
        role: required_text("role", &input.role)?,
        area: required_text("area", &input.area)?,
        contact: required_text("contact", &input.contact)?,
        trained_by: optional_text(input.trained_by.as_deref()),
        specialties: input.specialties,
        email: optional_text(input.email.as_deref()),
        location: input.location,
        availability: or_default(input.availability.as_deref(), DEFAULT_AVAILABILITY),
        created_at: now,
        updated_at: now,
    })
}

fn apply_worker_update(worker: &mut Worker, input: UpdateWorkerInput) -> Result<(), Invalid> {
    check_location(input.location)?;
    patch_text(&mut worker.name, "name", input.name.as_deref())?;
    patch_text(&mut worker.role, "role", input.role.as_deref())?;
    patch_text(&mut worker.area, "area", input.area.as_deref())?;
    patch_text(&mut worker.contact, "contact", input.contact.as_deref())?;
    patch_text(
        &mut worker.availability,
        "availability",
        input.availability.as_deref(),
    )?;
    if input.gender.is_some() {
        worker.gender = input.gender;
    }
    if let Some(trained_by) = optional_text(input.trained_by.as_deref()) {
        worker.trained_by = Some(trained_by);
    }
    if let Some(specialties) = input.specialties {
        worker.specialties = specialties;
    }
    if let Some(email) = optional_text(input.email.as_deref()) {
        worker.email = Some(email);
    }
    if input.location.is_some() {
        worker.location = input.location;
    }
    Ok(())
}

pub struct EventsApi<'a, S: Store> {
    pub(crate) core: &'a MonBondhu<S>,
}

impl<S: Store> EventsApi<'_, S> {
    pub fn create(&self, input: CreateEventInput) -> Result<HealthEvent, MonBondhuError> {
        let event = build_event(input).map_err(DirectoryError::from)?;
        self.core.store().events().insert(&event)?;
        Ok(event)
    }

    pub fn get(&self, id: &EventId) -> Result<HealthEvent, MonBondhuError> {
        Ok(self
            .core
            .store()
            .events()
            .get(id)?
            .ok_or(DirectoryError::NotFound { kind: EVENT })?)
    }

    pub fn list(&self, filter: &EventFilter) -> Result<Vec<HealthEvent>, MonBondhuError> {
        let today = self.core.calendar().today();
        Ok(self.core.store().events().list(filter, today)?)
    }

    pub fn update(
        &self,
        id: &EventId,
        input: UpdateEventInput,
    ) -> Result<HealthEvent, MonBondhuError> {
        self.core.with_tx(|store| {
            let mut event = store
                .events()
                .get(id)?
                .ok_or(DirectoryError::NotFound { kind: EVENT })?;
            apply_event_update(&mut event, input).map_err(DirectoryError::from)?;
            event.updated_at = Utc::now();
            store.events().replace(&event)?;
            Ok(event)
        })
    }

    pub fn delete(&self, id: &EventId) -> Result<(), MonBondhuError> {
        if self.core.store().events().delete(id)? {
            Ok(())
        } else {
            Err(DirectoryError::NotFound { kind: EVENT }.into())
        }
    }
}

fn build_event(input: CreateEventInput) -> Result<HealthEvent, Invalid> {
    let now = Utc::now();
    Ok(HealthEvent {
        id: EventId::generate(),
        title: required_text("title", &input.title)?,
        date: input.date,
        time: required_text("time", &input.time)?,
        location: required_text("location", &input.location)?,
        services: input.services,
        organizer: required_text("organizer", &input.organizer)?,
        icon: or_default(input.icon.as_deref(), DEFAULT_EVENT_ICON),
        created_at: now,
        updated_at: now,
    })
}

fn apply_event_update(event: &mut HealthEvent, input: UpdateEventInput) -> Result<(), Invalid> {
    patch_text(&mut event.title, "title", input.title.as_deref())?;
    patch_text(&mut event.time, "time", input.time.as_deref())?;
    patch_text(&mut event.location, "location", input.location.as_deref())?;
    patch_text(&mut event.organizer, "organizer", input.organizer.as_deref())?;
    patch_text(&mut event.icon, "icon", input.icon.as_deref())?;
    if let Some(date) = input.date {
        event.date = date;
    }
    if let Some(services) = input.services {
        event.services = services;
    }
    Ok(())
}
