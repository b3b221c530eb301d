//! Reminder schedules derived from a maternal record's anchor date.

use crate::types::enums::ScheduleKind;
use crate::types::maternal::{Anchor, ScheduleEntry};
use chrono::{Days, NaiveDate};

/// Days from last menstrual period to the expected delivery date.
pub const GESTATION_DAYS: u64 = 280;

const ANC_VISITS: [(u32, &str, &str); 3] = [
    (16, "প্রথম এএনসি চেকআপ", "রক্তচাপ, ওজন, রক্ত পরীক্ষা"),
    (24, "দ্বিতীয় এএনসি চেকআপ", "আলট্রাসাউন্ড, রক্তচাপ পরীক্ষা"),
    (32, "তৃতীয় এএনসি চেকআপ", "শিশুর অবস্থান পরীক্ষা"),
];

const VACCINES: [(u64, &str); 6] = [
    (0, "BCG ও পোলিও (জন্মের সময়)"),
    (42, "পেন্টা-১, পোলিও-১"),
    (70, "পেন্টা-২, পোলিও-২"),
    (98, "পেন্টা-৩, পোলিও-৩"),
    (270, "এমআর-১"),
    (450, "এমআর-২"),
];

const VACCINE_DESCRIPTION: &str = "নিকটস্থ টিকাদান কেন্দ্রে যান";

pub fn expected_delivery(lmp: NaiveDate) -> NaiveDate {
    lmp.checked_add_days(Days::new(GESTATION_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

pub fn pregnancy_anchor(lmp: NaiveDate) -> Anchor {
    Anchor::Pregnancy {
        lmp_date: lmp,
        edd: expected_delivery(lmp),
    }
}

pub fn pregnancy_schedule(lmp: NaiveDate) -> Vec<ScheduleEntry> {
    ANC_VISITS
        .iter()
        .map(|(week, title, description)| ScheduleEntry {
            kind: ScheduleKind::Anc,
            week: Some(*week),
            date: offset(lmp, u64::from(*week) * 7),
            title: (*title).to_string(),
            description: (*description).to_string(),
            completed: false,
        })
        .collect()
}

pub fn child_schedule(birth: NaiveDate) -> Vec<ScheduleEntry> {
    VACCINES
        .iter()
        .map(|(days, title)| ScheduleEntry {
            kind: ScheduleKind::Vaccine,
            week: None,
            date: offset(birth, *days),
            title: (*title).to_string(),
            description: VACCINE_DESCRIPTION.to_string(),
            completed: false,
        })
        .collect()
}

pub fn schedule_for(anchor: &Anchor) -> Vec<ScheduleEntry> {
    match anchor {
        Anchor::Pregnancy { lmp_date, .. } => pregnancy_schedule(*lmp_date),
        Anchor::Child { birth_date } => child_schedule(*birth_date),
    }
}

fn offset(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn pregnancy_visits_fall_on_week_offsets() {
        let lmp = date(2025, 1, 1);
        let schedule = pregnancy_schedule(lmp);
        let dates: Vec<_> = schedule.iter().map(|entry| entry.date).collect();
        assert_eq!(dates, vec![date(2025, 4, 23), date(2025, 6, 18), date(2025, 8, 13)]);
        assert!(schedule.iter().all(|entry| entry.kind == ScheduleKind::Anc));
        assert!(schedule.iter().all(|entry| !entry.completed));
        assert_eq!(schedule[0].week, Some(16));
    }

    #[test]
    fn due_date_is_280_days_after_lmp() {
        assert_eq!(expected_delivery(date(2025, 1, 1)), date(2025, 10, 8));
        let Anchor::Pregnancy { edd, .. } = pregnancy_anchor(date(2025, 1, 1)) else {
            panic!("expected pregnancy anchor");
        };
        assert_eq!(edd, date(2025, 10, 8));
    }

    #[test]
    fn child_schedule_has_six_vaccines_from_birth() {
        let birth = date(2025, 10, 1);
        let schedule = child_schedule(birth);
        assert_eq!(schedule.len(), 6);
        assert_eq!(schedule[0].date, birth);
        assert_eq!(schedule[1].date, date(2025, 11, 12));
        assert_eq!(schedule[5].date, date(2026, 12, 25));
        assert!(schedule.iter().all(|entry| entry.week.is_none()));
        assert!(schedule.windows(2).all(|pair| pair[0].date < pair[1].date));
    }
}
