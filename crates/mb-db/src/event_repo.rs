use crate::util::{
    DbError, count, decode_json, encode_json, from_date, from_rfc3339, parse_stored, query_all,
    query_one, to_date, to_rfc3339,
};
use chrono::NaiveDate;
use mb_core::directory::EventRepository;
use mb_core::error::DirectoryError;
use mb_core::types::{EventFilter, EventId, HealthEvent};
use rusqlite::Connection;

const COLUMNS: &str =
    "id, title, date, time, location, services, organizer, icon, created_at, updated_at";

pub struct EventRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> EventRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl EventRepository for EventRepo<'_> {
    fn insert(&self, event: &HealthEvent) -> Result<(), DirectoryError> {
        let sql = format!(
            "INSERT INTO events ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)"
        );
        let params = (
            event.id.as_str(),
            event.title.as_str(),
            to_date(event.date),
            event.time.as_str(),
            event.location.as_str(),
            encode_json(&event.services)?,
            event.organizer.as_str(),
            event.icon.as_str(),
            to_rfc3339(&event.created_at),
            to_rfc3339(&event.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &EventId) -> Result<Option<HealthEvent>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM events WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_event_row)?)
    }

    fn list(
        &self,
        filter: &EventFilter,
        today: NaiveDate,
    ) -> Result<Vec<HealthEvent>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM events ORDER BY date ASC, time ASC, id ASC");
        let events = query_all(self.conn, &sql, [], map_event_row)?;
        Ok(events
            .into_iter()
            .filter(|event| filter.matches(event, today))
            .collect())
    }

    fn replace(&self, event: &HealthEvent) -> Result<(), DirectoryError> {
        let sql = "UPDATE events SET title = ?1, date = ?2, time = ?3, location = ?4, services = ?5, organizer = ?6, icon = ?7, updated_at = ?8 WHERE id = ?9";
        let params = (
            event.title.as_str(),
            to_date(event.date),
            event.time.as_str(),
            event.location.as_str(),
            encode_json(&event.services)?,
            event.organizer.as_str(),
            event.icon.as_str(),
            to_rfc3339(&event.updated_at),
            event.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(DirectoryError::NotFound { kind: "Event" });
        }
        Ok(())
    }

    fn delete(&self, id: &EventId) -> Result<bool, DirectoryError> {
        let changed = self
            .conn
            .execute("DELETE FROM events WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<u64, DirectoryError> {
        Ok(count(self.conn, "SELECT COUNT(*) FROM events", [])?)
    }

    fn count_from(&self, date: NaiveDate) -> Result<u64, DirectoryError> {
        Ok(count(
            self.conn,
            "SELECT COUNT(*) FROM events WHERE date >= ?1",
            [to_date(date)],
        )?)
    }
}

fn map_event_row(row: &rusqlite::Row<'_>) -> Result<HealthEvent, DbError> {
    let id: String = row.get(0)?;
    let date: String = row.get(2)?;
    let services: String = row.get(5)?;
    let created_at: String = row.get(8)?;
    let updated_at: String = row.get(9)?;

    Ok(HealthEvent {
        id: parse_stored(&id)?,
        title: row.get(1)?,
        date: from_date(&date)?,
        time: row.get(3)?,
        location: row.get(4)?,
        services: decode_json(&services)?,
        organizer: row.get(6)?,
        icon: row.get(7)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}
