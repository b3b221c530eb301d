//! The local calendar that date-only fields are read against.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use std::fmt;
use std::str::FromStr;

/// Bangladesh Standard Time, UTC+6 all year.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 6 * 3600;

/// Turns instants into calendar dates at a fixed UTC offset. Birth dates,
/// LMP dates, checkups and event days are all local dates, so "today" has
/// to be the local day too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn date_at(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.date_at(Utc::now())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).map_or_else(Self::utc, Self::new)
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTC{}", self.offset)
    }
}

/// Parses an offset such as `+06:00` or `-03:30`.
impl FromStr for Calendar {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<FixedOffset>().map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn late_utc_evening_is_already_tomorrow_in_dhaka() {
        let instant = Utc.with_ymd_and_hms(2025, 6, 1, 23, 30, 0).unwrap();
        assert_eq!(
            Calendar::default().date_at(instant),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
        assert_eq!(
            Calendar::utc().date_at(instant),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
    }

    #[test]
    fn parses_signed_offsets() {
        let calendar: Calendar = "+06:00".parse().unwrap();
        assert_eq!(calendar, Calendar::default());
        let calendar: Calendar = " -03:30 ".parse().unwrap();
        assert_eq!(calendar.offset().local_minus_utc(), -(3 * 3600 + 30 * 60));
        assert!("Asia/Dhaka".parse::<Calendar>().is_err());
    }
}
