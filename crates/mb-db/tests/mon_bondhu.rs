use chrono::{Duration, NaiveDate, TimeZone, Utc};
use mb_core::error::{DirectoryError, HelpError, RecordError, SymptomError};
use mb_core::ticket::{CodeSource, MAX_TICKET_ATTEMPTS, TicketCode};
use mb_core::types::*;
use mb_core::{Calendar, MonBondhu, MonBondhuError};
use mb_db::DbStore;
use mb_db::schema::with_test_db;

fn core() -> MonBondhu<DbStore> {
    MonBondhu::new(DbStore::new(with_test_db().unwrap()))
}

/// Hands out a fixed sequence of codes, repeating the last one.
struct Scripted(Vec<TicketCode>);

impl CodeSource for Scripted {
    fn next_code(&mut self) -> TicketCode {
        if self.0.len() > 1 {
            self.0.remove(0)
        } else {
            self.0[0].clone()
        }
    }
}

fn code(number: u16) -> TicketCode {
    TicketCode::from_parts(2, 3, number).unwrap()
}

fn submission() -> SubmitHelpRequestInput {
    SubmitHelpRequestInput {
        name: " রহিম ".to_string(),
        phone: "01712345678".to_string(),
        location: "মিরপুর".to_string(),
        request_type: RequestType::Medication,
        description: "ওষুধ দরকার".to_string(),
        urgency: None,
    }
}

fn worker_input() -> CreateWorkerInput {
    CreateWorkerInput {
        name: "সালমা".to_string(),
        gender: Some(Gender::Female),
        role: "CHW".to_string(),
        area: "মিরপুর".to_string(),
        contact: "01800000000".to_string(),
        trained_by: None,
        specialties: vec!["মাতৃস্বাস্থ্য".to_string()],
        email: None,
        location: None,
        availability: None,
    }
}

#[test]
fn submit_assigns_code_and_defaults() {
    let core = core();
    let request = core
        .help_requests()
        .submit_with(&mut Scripted(vec![code(482)]), submission())
        .unwrap();
    assert_eq!(request.ticket_code, code(482));
    assert_eq!(request.status, HelpStatus::Pending);
    assert_eq!(request.urgency, Urgency::Medium);
    assert_eq!(request.name, "রহিম");
}

#[test]
fn random_codes_are_well_formed() {
    let core = core();
    let request = core.help_requests().submit(submission()).unwrap();
    assert!(TicketCode::parse(request.ticket_code.as_str()).is_ok());
}

#[test]
fn colliding_code_is_redrawn() {
    let core = core();
    let help = core.help_requests();
    help.submit_with(&mut Scripted(vec![code(100)]), submission())
        .unwrap();
    let second = help
        .submit_with(&mut Scripted(vec![code(100), code(101)]), submission())
        .unwrap();
    assert_eq!(second.ticket_code, code(101));
}

#[test]
fn persistent_collisions_exhaust_attempts() {
    let core = core();
    let help = core.help_requests();
    help.submit_with(&mut Scripted(vec![code(555)]), submission())
        .unwrap();
    let err = help
        .submit_with(&mut Scripted(vec![code(555)]), submission())
        .unwrap_err();
    assert!(matches!(
        err,
        MonBondhuError::Help(HelpError::TicketCodesExhausted { attempts }) if attempts == MAX_TICKET_ATTEMPTS
    ));
    assert_eq!(help.list(&HelpRequestFilter::default()).unwrap().len(), 1);
}

#[test]
fn blank_required_field_is_rejected() {
    let core = core();
    let err = core
        .help_requests()
        .submit(SubmitHelpRequestInput {
            phone: "   ".to_string(),
            ..submission()
        })
        .unwrap_err();
    assert!(matches!(err, MonBondhuError::Help(HelpError::InvalidInput { .. })));
}

#[test]
fn code_lookup_trims_and_misses_cleanly() {
    let core = core();
    let help = core.help_requests();
    let request = help
        .submit_with(&mut Scripted(vec![code(777)]), submission())
        .unwrap();
    let found = help
        .get_by_code(&format!("  {}\n", request.ticket_code))
        .unwrap();
    assert_eq!(found.request.id, request.id);
    for miss in ["হলুদ-ছাগল-778", "not a code", ""] {
        assert!(matches!(
            help.get_by_code(miss),
            Err(MonBondhuError::Help(HelpError::TicketNotFound))
        ));
    }
}

#[test]
fn status_overwrite_allows_any_transition() {
    let core = core();
    let help = core.help_requests();
    let request = help.submit(submission()).unwrap();
    let done = help
        .update_status(
            &request.id,
            HelpStatusInput {
                status: HelpStatus::Completed,
                response: Some("ওষুধ পৌঁছে দেওয়া হয়েছে".to_string()),
                assigned_worker: None,
            },
        )
        .unwrap();
    assert_eq!(done.status, HelpStatus::Completed);
    let reopened = help
        .update_status(
            &request.id,
            HelpStatusInput {
                status: HelpStatus::Pending,
                response: None,
                assigned_worker: None,
            },
        )
        .unwrap();
    assert_eq!(reopened.status, HelpStatus::Pending);
    assert_eq!(reopened.response.as_deref(), Some("ওষুধ পৌঁছে দেওয়া হয়েছে"));
    assert_eq!(reopened.ticket_code, request.ticket_code);
}

#[test]
fn assign_requires_existing_worker_and_embeds_it() {
    let core = core();
    let request = core.help_requests().submit(submission()).unwrap();
    let missing = core
        .help_requests()
        .assign(
            &request.id,
            AssignWorkerInput {
                worker_id: WorkerId::generate(),
            },
        )
        .unwrap_err();
    assert!(matches!(
        missing,
        MonBondhuError::Directory(DirectoryError::NotFound { kind: "Worker" })
    ));

    let worker = core.workers().create(worker_input()).unwrap();
    let detail = core
        .help_requests()
        .assign(
            &request.id,
            AssignWorkerInput {
                worker_id: worker.id.clone(),
            },
        )
        .unwrap();
    assert_eq!(detail.request.status, HelpStatus::Assigned);
    assert_eq!(detail.worker.as_ref().map(|w| &w.id), Some(&worker.id));

    let fetched = core.help_requests().get(&request.id).unwrap();
    assert_eq!(fetched.worker, Some(worker));
}

#[test]
fn update_ignores_nothing_but_ticket_code() {
    let core = core();
    let help = core.help_requests();
    let request = help.submit(submission()).unwrap();
    let updated = help
        .update(
            &request.id,
            UpdateHelpRequestInput {
                urgency: Some(Urgency::Critical),
                location: Some("সাভার".to_string()),
                ..UpdateHelpRequestInput::default()
            },
        )
        .unwrap();
    assert_eq!(updated.urgency, Urgency::Critical);
    assert_eq!(updated.location, "সাভার");
    assert_eq!(updated.ticket_code, request.ticket_code);
}

#[test]
fn delete_twice_reports_not_found() {
    let core = core();
    let request = core.help_requests().submit(submission()).unwrap();
    core.help_requests().delete(&request.id).unwrap();
    assert!(matches!(
        core.help_requests().delete(&request.id),
        Err(MonBondhuError::Help(HelpError::NotFound))
    ));
}

#[test]
fn mental_record_needs_mood_or_level() {
    let core = core();
    let api = core.mental_health();
    let empty = CreateMentalRecordInput {
        user_id: None,
        mood: None,
        mood_level: None,
        activities: Vec::new(),
        notes: None,
        date: None,
    };
    assert!(matches!(
        api.create(empty.clone()),
        Err(MonBondhuError::Record(RecordError::InvalidInput { .. }))
    ));
    assert!(api
        .create(CreateMentalRecordInput {
            mood_level: Some(11),
            ..empty.clone()
        })
        .is_err());
    let record = api
        .create(CreateMentalRecordInput {
            mood_level: Some(7),
            ..empty
        })
        .unwrap();
    assert_eq!(record.user_id.as_str(), "anonymous");
    assert!(record.mood.is_none());
}

#[test]
fn maternal_pregnancy_gets_schedule_and_progress() {
    let core = core();
    let api = core.maternal_health();
    let lmp = Utc::now().date_naive() - Duration::days(30);
    let record = api
        .create(CreateMaternalRecordInput {
            user_id: None,
            tracking_type: None,
            lmp_date: Some(lmp),
            birth_date: None,
            profile: MaternalProfile::default(),
        })
        .unwrap();
    assert_eq!(record.schedule.len(), 3);
    assert_eq!(record.schedule[0].date, lmp + Duration::weeks(16));

    let updated = api
        .set_schedule_progress(&record.id, 2, ScheduleProgressInput { completed: true })
        .unwrap();
    assert!(updated.schedule[2].completed);
    assert_eq!(updated.anchor, record.anchor);

    assert!(matches!(
        api.set_schedule_progress(&record.id, 3, ScheduleProgressInput { completed: true }),
        Err(MonBondhuError::Record(RecordError::ScheduleEntryNotFound { index: 3 }))
    ));
}

#[test]
fn maternal_anchor_rules() {
    let core = core();
    let api = core.maternal_health();
    let base = CreateMaternalRecordInput {
        user_id: None,
        tracking_type: Some(TrackingType::Child),
        lmp_date: None,
        birth_date: None,
        profile: MaternalProfile::default(),
    };
    assert!(api.create(base.clone()).is_err());
    let tomorrow = core.calendar().today() + Duration::days(1);
    assert!(api
        .create(CreateMaternalRecordInput {
            birth_date: Some(tomorrow),
            ..base.clone()
        })
        .is_err());
    let record = api
        .create(CreateMaternalRecordInput {
            birth_date: NaiveDate::from_ymd_opt(2025, 10, 1),
            ..base
        })
        .unwrap();
    assert_eq!(record.schedule.len(), 6);
    assert_eq!(record.anchor.tracking_type(), TrackingType::Child);
}

#[test]
fn checkup_defaults_to_today() {
    let core = core();
    let api = core.maternal_health();
    let record = api
        .create(CreateMaternalRecordInput {
            user_id: None,
            tracking_type: None,
            lmp_date: Some(Utc::now().date_naive()),
            birth_date: None,
            profile: MaternalProfile::default(),
        })
        .unwrap();
    let updated = api.add_checkup(&record.id, CheckupInput::default()).unwrap();
    assert_eq!(updated.checkups.len(), 1);
    assert_eq!(updated.checkups[0].date, core.calendar().today());
}

#[test]
fn symptom_check_is_evaluated_and_stored() {
    let core = core();
    let api = core.symptom_checks();
    let check = api
        .create(CreateSymptomCheckInput {
            user_id: None,
            symptom: "কাশি".to_string(),
            answer: "yes".to_string(),
            age: Some(5),
        })
        .unwrap();
    assert_eq!(check.symptom, "কাশি");
    assert_eq!(check.answer, "হ্যাঁ");
    assert_eq!(check.result.severity, Severity::High);
    assert_eq!(api.get(&check.id).unwrap(), check);

    assert!(matches!(
        api.create(CreateSymptomCheckInput {
            user_id: None,
            symptom: "মাথা ব্যথা".to_string(),
            answer: "yes".to_string(),
            age: None,
        }),
        Err(MonBondhuError::Symptom(SymptomError::UnknownOption { .. }))
    ));
}

#[test]
fn nearby_centers_are_sorted_and_bounded() {
    let core = core();
    let api = core.health_centers();
    let origin = GeoPoint {
        lat: 23.8103,
        lng: 90.4125,
    };
    let make = |name: &str, location: Option<GeoPoint>| CreateHealthCenterInput {
        name: name.to_string(),
        center_type: "হাসপাতাল".to_string(),
        division: "ঢাকা".to_string(),
        district: "ঢাকা".to_string(),
        upazila: "গুলশান".to_string(),
        location_description: "মূল সড়ক".to_string(),
        services: Vec::new(),
        timing: None,
        contact: None,
        location,
        is_emergency: false,
    };
    let near = api
        .create(make(
            "near",
            Some(GeoPoint {
                lat: 23.8110,
                lng: 90.4130,
            }),
        ))
        .unwrap();
    let mid = api
        .create(make(
            "mid",
            Some(GeoPoint {
                lat: 23.8300,
                lng: 90.4125,
            }),
        ))
        .unwrap();
    api.create(make(
        "far",
        Some(GeoPoint {
            lat: 22.3569,
            lng: 91.7832,
        }),
    ))
    .unwrap();
    api.create(make("unlocated", None)).unwrap();
    assert_eq!(near.timing, "২৪ ঘণ্টা");

    let found = api.nearby(origin, NearbyQuery::default()).unwrap();
    let ids: Vec<_> = found.iter().map(|c| c.center.id.clone()).collect();
    assert_eq!(ids, vec![near.id, mid.id]);
    assert!(found[0].distance_meters < found[1].distance_meters);

    assert!(api
        .nearby(
            GeoPoint {
                lat: 200.0,
                lng: 0.0
            },
            NearbyQuery::default()
        )
        .is_err());
}

#[test]
fn statistics_window_and_totals() {
    let core = core();
    core.help_requests().submit(submission()).unwrap();
    core.mental_health()
        .create(CreateMentalRecordInput {
            user_id: None,
            mood: Some(Mood::Happy),
            mood_level: None,
            activities: Vec::new(),
            notes: None,
            date: None,
        })
        .unwrap();
    core.maternal_health()
        .create(CreateMaternalRecordInput {
            user_id: None,
            tracking_type: None,
            lmp_date: Some(Utc::now().date_naive()),
            birth_date: None,
            profile: MaternalProfile::default(),
        })
        .unwrap();
    core.workers().create(worker_input()).unwrap();

    let now = Utc::now();
    let stats = core.statistics().dashboard_at(now).unwrap();
    assert_eq!(stats.mental_health_checkins, 1);
    assert_eq!(stats.maternal_health_checkins, 1);
    assert_eq!(
        stats.total_checkins_this_week,
        stats.mental_health_checkins + stats.maternal_health_checkins
    );
    assert_eq!(stats.total_help_requests, 1);
    assert_eq!(stats.help_requests_this_week, 1);
    assert_eq!(stats.total_workers, 1);
    assert_eq!(stats.window_start, now - Duration::days(7));
    assert_eq!(
        stats.mood_distribution,
        vec![MoodCount {
            mood: Some(Mood::Happy),
            count: 1
        }]
    );

    let later = core
        .statistics()
        .dashboard_at(now + Duration::days(8))
        .unwrap();
    assert_eq!(later.help_requests_this_week, 0);
    assert_eq!(later.total_checkins_this_week, 0);
    assert_eq!(later.total_help_requests, 1);
}

#[test]
fn status_update_can_hand_over_to_a_worker() {
    let core = core();
    let help = core.help_requests();
    let request = help.submit(submission()).unwrap();
    let missing = help
        .update_status(
            &request.id,
            HelpStatusInput {
                status: HelpStatus::InProgress,
                response: None,
                assigned_worker: Some(WorkerId::generate()),
            },
        )
        .unwrap_err();
    assert!(matches!(
        missing,
        MonBondhuError::Directory(DirectoryError::NotFound { kind: "Worker" })
    ));

    let worker = core.workers().create(worker_input()).unwrap();
    let updated = help
        .update_status(
            &request.id,
            HelpStatusInput {
                status: HelpStatus::InProgress,
                response: Some("   ".to_string()),
                assigned_worker: Some(worker.id.clone()),
            },
        )
        .unwrap();
    assert_eq!(updated.status, HelpStatus::InProgress);
    assert_eq!(updated.assigned_worker.as_ref(), Some(&worker.id));
    assert_eq!(updated.response, None);
    assert_eq!(help.get(&request.id).unwrap().worker, Some(worker));
}

#[test]
fn local_day_decides_what_counts_as_the_future() {
    let late_evening = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
    let born_local_today = CreateMaternalRecordInput {
        user_id: None,
        tracking_type: Some(TrackingType::Child),
        lmp_date: None,
        birth_date: NaiveDate::from_ymd_opt(2025, 6, 2),
        profile: MaternalProfile::default(),
    };

    let dhaka = MonBondhu::with_calendar(DbStore::new(with_test_db().unwrap()), Calendar::default());
    let record = dhaka
        .maternal_health()
        .create_at(born_local_today.clone(), late_evening)
        .unwrap();
    assert_eq!(record.created_at, late_evening);

    let utc = MonBondhu::with_calendar(DbStore::new(with_test_db().unwrap()), Calendar::utc());
    assert!(matches!(
        utc.maternal_health()
            .create_at(born_local_today, late_evening),
        Err(MonBondhuError::Record(RecordError::InvalidInput { .. }))
    ));
}

#[test]
fn upcoming_events_start_on_the_local_day() {
    let late_evening = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
    let event = CreateEventInput {
        title: "টিকাদান ক্যাম্প".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        time: "সকাল ১০টা".to_string(),
        location: "মিরপুর".to_string(),
        services: Vec::new(),
        organizer: "ইপিআই".to_string(),
        icon: None,
    };

    let dhaka = MonBondhu::with_calendar(DbStore::new(with_test_db().unwrap()), Calendar::default());
    dhaka.events().create(event.clone()).unwrap();
    let stats = dhaka.statistics().dashboard_at(late_evening).unwrap();
    assert_eq!(stats.upcoming_events, 0);

    let utc = MonBondhu::with_calendar(DbStore::new(with_test_db().unwrap()), Calendar::utc());
    utc.events().create(event).unwrap();
    let stats = utc.statistics().dashboard_at(late_evening).unwrap();
    assert_eq!(stats.upcoming_events, 1);
}
