use crate::error::{DirectoryError, HelpError, RecordError};
use chrono::NaiveDate;

pub const MOOD_LEVEL_MIN: u8 = 1;
pub const MOOD_LEVEL_MAX: u8 = 10;

/// A rejected input, convertible into each area's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalid(pub String);

impl From<Invalid> for HelpError {
    fn from(value: Invalid) -> Self {
        Self::InvalidInput { message: value.0 }
    }
}

impl From<Invalid> for RecordError {
    fn from(value: Invalid) -> Self {
        Self::InvalidInput { message: value.0 }
    }
}

impl From<Invalid> for DirectoryError {
    fn from(value: Invalid) -> Self {
        Self::InvalidInput { message: value.0 }
    }
}

/// Trims `value` and rejects it when nothing is left.
pub fn required_text(field: &str, value: &str) -> Result<String, Invalid> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Invalid(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// Trims `value`; blank counts as not supplied.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Overwrites `target` with the trimmed `value` when one was supplied.
pub fn patch_text(target: &mut String, field: &str, value: Option<&str>) -> Result<(), Invalid> {
    if let Some(value) = value {
        *target = required_text(field, value)?;
    }
    Ok(())
}

pub fn validate_mood_level(level: u8) -> Result<(), Invalid> {
    if (MOOD_LEVEL_MIN..=MOOD_LEVEL_MAX).contains(&level) {
        Ok(())
    } else {
        Err(Invalid(format!(
            "moodLevel must be between {MOOD_LEVEL_MIN} and {MOOD_LEVEL_MAX}"
        )))
    }
}

pub fn not_in_future(field: &str, date: NaiveDate, today: NaiveDate) -> Result<(), Invalid> {
    if date > today {
        return Err(Invalid(format!("{field} cannot be in the future")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  রহিম ").unwrap(), "রহিম");
        assert_eq!(
            required_text("name", " \t"),
            Err(Invalid("name is required".to_string()))
        );
    }

    #[test]
    fn optional_text_drops_blank() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(optional_text(Some(" আসছি ")).as_deref(), Some("আসছি"));
    }

    #[test]
    fn patch_text_keeps_value_when_absent() {
        let mut name = "রহিম".to_string();
        patch_text(&mut name, "name", None).unwrap();
        assert_eq!(name, "রহিম");
        patch_text(&mut name, "name", Some(" করিম ")).unwrap();
        assert_eq!(name, "করিম");
        assert!(patch_text(&mut name, "name", Some("")).is_err());
        assert_eq!(name, "করিম");
    }

    #[test]
    fn mood_level_bounds_are_inclusive() {
        assert!(validate_mood_level(1).is_ok());
        assert!(validate_mood_level(10).is_ok());
        assert!(validate_mood_level(0).is_err());
        assert!(validate_mood_level(11).is_err());
    }

    #[test]
    fn future_dates_are_rejected() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        assert!(not_in_future("lmpDate", today, today).is_ok());
        assert!(not_in_future("lmpDate", today.succ_opt().unwrap(), today).is_err());
    }
}
