use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use mb_core::error::{DirectoryError, HelpError, RecordError};
use rusqlite::{Connection, Params, Row};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json encode failed: {message}")]
    JsonEncode { message: String },
    #[error("json decode failed: {message}")]
    JsonDecode { message: String },
    #[error("invalid enum value: {value}")]
    InvalidEnum { value: String },
    #[error("invalid timestamp: {value}")]
    InvalidTimestamp { value: String },
    #[error("invalid date: {value}")]
    InvalidDate { value: String },
    #[error("invalid stored value: {message}")]
    InvalidValue { message: String },
}

impl From<DbError> for HelpError {
    fn from(value: DbError) -> Self {
        Self::Storage {
            message: value.to_string(),
        }
    }
}

impl From<DbError> for RecordError {
    fn from(value: DbError) -> Self {
        Self::Storage {
            message: value.to_string(),
        }
    }
}

impl From<DbError> for DirectoryError {
    fn from(value: DbError) -> Self {
        Self::Storage {
            message: value.to_string(),
        }
    }
}

/// Fixed-width UTC form, so that text order in SQL matches time order.
pub fn to_rfc3339(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn from_rfc3339(value: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| DbError::InvalidTimestamp {
            value: value.to_string(),
        })
}

pub fn to_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

pub fn from_date(value: &str) -> Result<NaiveDate, DbError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DbError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn encode_json<T: Serialize>(value: &T) -> Result<String, DbError> {
    serde_json::to_string(value).map_err(|err| DbError::JsonEncode {
        message: err.to_string(),
    })
}

pub fn decode_json<T: DeserializeOwned>(value: &str) -> Result<T, DbError> {
    serde_json::from_str(value).map_err(|err| DbError::JsonDecode {
        message: err.to_string(),
    })
}

pub fn encode_enum<T: Serialize>(value: &T) -> Result<String, DbError> {
    let json = serde_json::to_value(value).map_err(|err| DbError::JsonEncode {
        message: err.to_string(),
    })?;
    match json {
        Value::String(value) => Ok(value),
        other => Err(DbError::InvalidEnum {
            value: other.to_string(),
        }),
    }
}

pub fn decode_enum<T: DeserializeOwned>(value: &str) -> Result<T, DbError> {
    let json = Value::String(value.to_string());
    serde_json::from_value(json).map_err(|err| DbError::JsonDecode {
        message: err.to_string(),
    })
}

/// Parses a stored id or any other `FromStr` value written by this crate.
pub fn parse_stored<T>(value: &str) -> Result<T, DbError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| DbError::InvalidValue {
        message: err.to_string(),
    })
}

pub fn query_all<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Vec<T>, DbError>
where
    P: Params,
    F: Fn(&Row<'_>) -> Result<T, DbError>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut items = Vec::new();
    while let Some(row) = rows.next()? {
        items.push(map(row)?);
    }
    Ok(items)
}

pub fn query_one<T, P, F>(conn: &Connection, sql: &str, params: P, map: F) -> Result<Option<T>, DbError>
where
    P: Params,
    F: Fn(&Row<'_>) -> Result<T, DbError>,
{
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    match rows.next()? {
        Some(row) => map(row).map(Some),
        None => Ok(None),
    }
}

pub fn count<P: Params>(conn: &Connection, sql: &str, params: P) -> Result<u64, DbError> {
    let value: i64 = conn.query_row(sql, params, |row| row.get(0))?;
    u64::try_from(value).map_err(|err| DbError::InvalidValue {
        message: err.to_string(),
    })
}

pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
