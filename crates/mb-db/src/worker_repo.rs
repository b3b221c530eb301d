use crate::center_repo::point;
use crate::util::{
    DbError, count, decode_enum, decode_json, encode_enum, encode_json, from_rfc3339,
    parse_stored, query_all, query_one, to_rfc3339,
};
use mb_core::directory::WorkerRepository;
use mb_core::error::DirectoryError;
use mb_core::types::{Worker, WorkerFilter, WorkerId};
use rusqlite::Connection;

const COLUMNS: &str = "id, name, gender, role, area, contact, trained_by, specialties, email, lat, lng, availability, created_at, updated_at";

pub struct WorkerRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> WorkerRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl WorkerRepository for WorkerRepo<'_> {
    fn insert(&self, worker: &Worker) -> Result<(), DirectoryError> {
        let sql = format!(
            "INSERT INTO workers ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
        );
        let params = (
            worker.id.as_str(),
            worker.name.as_str(),
            worker.gender.as_ref().map(encode_enum).transpose()?,
            worker.role.as_str(),
            worker.area.as_str(),
            worker.contact.as_str(),
            worker.trained_by.as_deref(),
            encode_json(&worker.specialties)?,
            worker.email.as_deref(),
            worker.location.map(|point| point.lat),
            worker.location.map(|point| point.lng),
            worker.availability.as_str(),
            to_rfc3339(&worker.created_at),
            to_rfc3339(&worker.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &WorkerId) -> Result<Option<Worker>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM workers WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_worker_row)?)
    }

    fn list(&self, filter: &WorkerFilter) -> Result<Vec<Worker>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM workers ORDER BY name, id");
        let workers = query_all(self.conn, &sql, [], map_worker_row)?;
        Ok(workers
            .into_iter()
            .filter(|worker| filter.matches(worker))
            .collect())
    }

    fn replace(&self, worker: &Worker) -> Result<(), DirectoryError> {
        let sql = "UPDATE workers SET name = ?1, gender = ?2, role = ?3, area = ?4, contact = ?5, trained_by = ?6, specialties = ?7, email = ?8, lat = ?9, lng = ?10, availability = ?11, updated_at = ?12 WHERE id = ?13";
        let params = (
            worker.name.as_str(),
            worker.gender.as_ref().map(encode_enum).transpose()?,
            worker.role.as_str(),
            worker.area.as_str(),
            worker.contact.as_str(),
            worker.trained_by.as_deref(),
            encode_json(&worker.specialties)?,
            worker.email.as_deref(),
            worker.location.map(|point| point.lat),
            worker.location.map(|point| point.lng),
            worker.availability.as_str(),
            to_rfc3339(&worker.updated_at),
            worker.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(DirectoryError::NotFound { kind: "Worker" });
        }
        Ok(())
    }

    fn delete(&self, id: &WorkerId) -> Result<bool, DirectoryError> {
        let changed = self
            .conn
            .execute("DELETE FROM workers WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<u64, DirectoryError> {
        Ok(count(self.conn, "SELECT COUNT(*) FROM workers", [])?)
    }
}

fn map_worker_row(row: &rusqlite::Row<'_>) -> Result<Worker, DbError> {
    let id: String = row.get(0)?;
    let gender: Option<String> = row.get(2)?;
    let specialties: String = row.get(7)?;
    let created_at: String = row.get(12)?;
    let updated_at: String = row.get(13)?;

    Ok(Worker {
        id: parse_stored(&id)?,
        name: row.get(1)?,
        gender: gender.as_deref().map(decode_enum).transpose()?,
        role: row.get(3)?,
        area: row.get(4)?,
        contact: row.get(5)?,
        trained_by: row.get(6)?,
        specialties: decode_json(&specialties)?,
        email: row.get(8)?,
        location: point(row.get(9)?, row.get(10)?),
        availability: row.get(11)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Utc;
    use mb_core::types::Gender;

    fn worker(name: &str, area: &str, specialties: &[&str]) -> Worker {
        let now = Utc::now();
        Worker {
            id: WorkerId::generate(),
            name: name.to_string(),
            gender: Some(Gender::Female),
            role: "স্বাস্থ্যকর্মী".to_string(),
            area: area.to_string(),
            contact: "01700000000".to_string(),
            trained_by: Some("BRAC".to_string()),
            specialties: specialties.iter().map(ToString::to_string).collect(),
            email: None,
            location: None,
            availability: "Available".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn round_trip_and_substring_filters() {
        let conn = with_test_db().unwrap();
        let repo = WorkerRepo::new(&conn);
        let salma = worker("Salma", "Savar, Dhaka", &["Maternal Health", "Nutrition"]);
        let karim = worker("Karim", "Mirpur", &["First Aid"]);
        repo.insert(&salma).unwrap();
        repo.insert(&karim).unwrap();
        assert_eq!(repo.get(&salma.id).unwrap(), Some(salma.clone()));

        let found = repo
            .list(&WorkerFilter {
                area: Some("savar".to_string()),
                specialization: Some("maternal".to_string()),
                availability: None,
            })
            .unwrap();
        assert_eq!(found, vec![salma]);
        assert_eq!(repo.count().unwrap(), 2);
    }
}
