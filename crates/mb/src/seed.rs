//! Sample directory data for a fresh install.

use chrono::{Days, NaiveDate};
use mb_core::types::{
    CreateEventInput, CreateHealthCenterInput, CreateHealthTipInput, CreateWorkerInput, GeoPoint,
    Gender, HealthCenterFilter, Language,
};
use mb_core::{MonBondhu, MonBondhuError, Store};
use tracing::info;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub health_centers: usize,
    pub health_tips: usize,
    pub workers: usize,
    pub events: usize,
}

/// Inserts the sample directory. A store that already lists health centers
/// is left alone and reported as `None`.
pub fn seed<S: Store>(
    core: &MonBondhu<S>,
    today: NaiveDate,
) -> Result<Option<SeedReport>, MonBondhuError> {
    if !core
        .health_centers()
        .list(&HealthCenterFilter::default())?
        .is_empty()
    {
        info!("directory already populated, skipping seed");
        return Ok(None);
    }

    let mut report = SeedReport::default();
    for input in health_centers() {
        core.health_centers().create(input)?;
        report.health_centers += 1;
    }
    for input in health_tips() {
        core.health_tips().create(input)?;
        report.health_tips += 1;
    }
    for input in workers() {
        core.workers().create(input)?;
        report.workers += 1;
    }
    for input in events(today) {
        core.events().create(input)?;
        report.events += 1;
    }
    info!(
        health_centers = report.health_centers,
        health_tips = report.health_tips,
        workers = report.workers,
        events = report.events,
        "seeded directory"
    );
    Ok(Some(report))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn health_centers() -> Vec<CreateHealthCenterInput> {
    vec![
        CreateHealthCenterInput {
            name: "ঢাকা মেডিকেল কলেজ হাসপাতাল".to_string(),
            center_type: "হাসপাতাল".to_string(),
            division: "ঢাকা".to_string(),
            district: "ঢাকা".to_string(),
            upazila: "শাহবাগ".to_string(),
            location_description: "বকশীবাজার, ঢাকা ১০০০".to_string(),
            services: strings(&["জরুরি বিভাগ", "প্রসূতি সেবা", "শিশু বিভাগ"]),
            timing: None,
            contact: Some("02-55165088".to_string()),
            location: Some(GeoPoint {
                lat: 23.7257,
                lng: 90.3976,
            }),
            is_emergency: true,
        },
        CreateHealthCenterInput {
            name: "মিরপুর উপজেলা স্বাস্থ্য কমপ্লেক্স".to_string(),
            center_type: "উপজেলা স্বাস্থ্য কমপ্লেক্স".to_string(),
            division: "ঢাকা".to_string(),
            district: "ঢাকা".to_string(),
            upazila: "মিরপুর".to_string(),
            location_description: "মিরপুর ১০ গোলচত্বরের কাছে".to_string(),
            services: strings(&["সাধারণ চিকিৎসা", "টিকাদান", "এএনসি চেকআপ"]),
            timing: Some("সকাল ৮টা - বিকাল ৪টা".to_string()),
            contact: None,
            location: Some(GeoPoint {
                lat: 23.8069,
                lng: 90.3687,
            }),
            is_emergency: false,
        },
        CreateHealthCenterInput {
            name: "সাভার কমিউনিটি ক্লিনিক".to_string(),
            center_type: "কমিউনিটি ক্লিনিক".to_string(),
            division: "ঢাকা".to_string(),
            district: "ঢাকা".to_string(),
            upazila: "সাভার".to_string(),
            location_description: "বাজার রোড, সাভার".to_string(),
            services: strings(&["প্রাথমিক চিকিৎসা", "পরিবার পরিকল্পনা"]),
            timing: Some("সকাল ৯টা - বিকাল ৩টা".to_string()),
            contact: None,
            location: None,
            is_emergency: false,
        },
    ]
}

fn health_tips() -> Vec<CreateHealthTipInput> {
    vec![
        CreateHealthTipInput {
            title: "বিশুদ্ধ পানি পান করুন".to_string(),
            description: "গরমে পানিশূন্যতা এড়াতে দিনে অন্তত ৮ গ্লাস ফুটানো পানি পান করুন।"
                .to_string(),
            category: "পুষ্টি".to_string(),
            season: Some("গ্রীষ্ম".to_string()),
            icon: Some("💧".to_string()),
            language: None,
        },
        CreateHealthTipInput {
            title: "মশারি ব্যবহার করুন".to_string(),
            description: "বর্ষায় ডেঙ্গু ও ম্যালেরিয়া থেকে বাঁচতে ঘুমানোর সময় মশারি টানান।"
                .to_string(),
            category: "রোগ প্রতিরোধ".to_string(),
            season: Some("বর্ষা".to_string()),
            icon: Some("🦟".to_string()),
            language: None,
        },
        CreateHealthTipInput {
            title: "শিশুকে গরম রাখুন".to_string(),
            description: "শীতে শিশুদের নিউমোনিয়া থেকে রক্ষা করতে গরম কাপড় পরান।".to_string(),
            category: "শিশু স্বাস্থ্য".to_string(),
            season: Some("শীত".to_string()),
            icon: Some("🧣".to_string()),
            language: None,
        },
        CreateHealthTipInput {
            title: "Wash your hands".to_string(),
            description: "Wash hands with soap before eating and after using the toilet."
                .to_string(),
            category: "hygiene".to_string(),
            season: None,
            icon: Some("🧼".to_string()),
            language: Some(Language::En),
        },
    ]
}

fn workers() -> Vec<CreateWorkerInput> {
    vec![
        CreateWorkerInput {
            name: "সালমা বেগম".to_string(),
            gender: Some(Gender::Female),
            role: "কমিউনিটি হেলথ ওয়ার্কার".to_string(),
            area: "মিরপুর".to_string(),
            contact: "01711000001".to_string(),
            trained_by: Some("ব্র্যাক".to_string()),
            specialties: strings(&["মাতৃস্বাস্থ্য", "টিকাদান"]),
            email: None,
            location: Some(GeoPoint {
                lat: 23.8041,
                lng: 90.3665,
            }),
            availability: None,
        },
        CreateWorkerInput {
            name: "রফিকুল ইসলাম".to_string(),
            gender: Some(Gender::Male),
            role: "স্বাস্থ্য সহকারী".to_string(),
            area: "সাভার".to_string(),
            contact: "01711000002".to_string(),
            trained_by: None,
            specialties: strings(&["প্রাথমিক চিকিৎসা", "মানসিক স্বাস্থ্য"]),
            email: None,
            location: None,
            availability: Some("Busy".to_string()),
        },
    ]
}

fn events(today: NaiveDate) -> Vec<CreateEventInput> {
    let in_days = |days: u64| today.checked_add_days(Days::new(days)).unwrap_or(today);
    vec![
        CreateEventInput {
            title: "বিনামূল্যে স্বাস্থ্য ক্যাম্প".to_string(),
            date: in_days(7),
            time: "সকাল ১০টা - দুপুর ২টা".to_string(),
            location: "মিরপুর সরকারি প্রাথমিক বিদ্যালয় মাঠ".to_string(),
            services: strings(&["রক্তচাপ পরীক্ষা", "ডায়াবেটিস পরীক্ষা"]),
            organizer: "মিরপুর উপজেলা স্বাস্থ্য কমপ্লেক্স".to_string(),
            icon: None,
        },
        CreateEventInput {
            title: "শিশু টিকাদান দিবস".to_string(),
            date: in_days(21),
            time: "সকাল ৯টা - বিকাল ৩টা".to_string(),
            location: "সাভার কমিউনিটি ক্লিনিক".to_string(),
            services: strings(&["পেন্টা", "পোলিও", "এমআর"]),
            organizer: "ইপিআই".to_string(),
            icon: Some("💉".to_string()),
        },
    ]
}
