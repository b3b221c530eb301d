use crate::util::{
    DbError, count, decode_enum, encode_enum, from_rfc3339, is_unique_violation, parse_stored,
    query_all, query_one, to_rfc3339,
};
use chrono::{DateTime, Utc};
use mb_core::error::HelpError;
use mb_core::help::HelpRepository;
use mb_core::ticket::TicketCode;
use mb_core::types::{HelpRequest, HelpRequestFilter, HelpRequestId, StatusCount};
use rusqlite::Connection;

const COLUMNS: &str = "id, ticket_code, name, phone, location, request_type, description, urgency, status, response, assigned_worker, created_at, updated_at";

pub struct HelpRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> HelpRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl HelpRepository for HelpRepo<'_> {
    fn insert(&self, request: &HelpRequest) -> Result<(), HelpError> {
        let sql = format!(
            "INSERT INTO help_requests ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        );
        let params = (
            request.id.as_str(),
            request.ticket_code.as_str(),
            request.name.as_str(),
            request.phone.as_str(),
            request.location.as_str(),
            encode_enum(&request.request_type)?,
            request.description.as_str(),
            encode_enum(&request.urgency)?,
            encode_enum(&request.status)?,
            request.response.as_deref(),
            request.assigned_worker.as_ref().map(|id| id.as_str()),
            to_rfc3339(&request.created_at),
            to_rfc3339(&request.updated_at),
        );
        match self.conn.execute(&sql, params) {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => Err(HelpError::TicketCodeTaken),
            Err(err) => Err(DbError::from(err).into()),
        }
    }

    fn get(&self, id: &HelpRequestId) -> Result<Option<HelpRequest>, HelpError> {
        let sql = format!("SELECT {COLUMNS} FROM help_requests WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_help_row)?)
    }

    fn get_by_code(&self, code: &TicketCode) -> Result<Option<HelpRequest>, HelpError> {
        let sql = format!("SELECT {COLUMNS} FROM help_requests WHERE ticket_code = ?1");
        Ok(query_one(self.conn, &sql, [code.as_str()], map_help_row)?)
    }

    fn list(&self, filter: &HelpRequestFilter) -> Result<Vec<HelpRequest>, HelpError> {
        let sql =
            format!("SELECT {COLUMNS} FROM help_requests ORDER BY created_at DESC, id DESC");
        let requests = query_all(self.conn, &sql, [], map_help_row)?;
        Ok(requests
            .into_iter()
            .filter(|request| filter.matches(request))
            .collect())
    }

    fn replace(&self, request: &HelpRequest) -> Result<(), HelpError> {
        let sql = "UPDATE help_requests SET name = ?1, phone = ?2, location = ?3, request_type = ?4, description = ?5, urgency = ?6, status = ?7, response = ?8, assigned_worker = ?9, updated_at = ?10 WHERE id = ?11";
        let params = (
            request.name.as_str(),
            request.phone.as_str(),
            request.location.as_str(),
            encode_enum(&request.request_type)?,
            request.description.as_str(),
            encode_enum(&request.urgency)?,
            encode_enum(&request.status)?,
            request.response.as_deref(),
            request.assigned_worker.as_ref().map(|id| id.as_str()),
            to_rfc3339(&request.updated_at),
            request.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(HelpError::NotFound);
        }
        Ok(())
    }

    fn delete(&self, id: &HelpRequestId) -> Result<bool, HelpError> {
        let changed = self
            .conn
            .execute("DELETE FROM help_requests WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<u64, HelpError> {
        Ok(count(self.conn, "SELECT COUNT(*) FROM help_requests", [])?)
    }

    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, HelpError> {
        Ok(count(
            self.conn,
            "SELECT COUNT(*) FROM help_requests WHERE created_at >= ?1",
            [to_rfc3339(&since)],
        )?)
    }

    fn count_by_status(&self) -> Result<Vec<StatusCount>, HelpError> {
        let sql = "SELECT status, COUNT(*) AS n FROM help_requests GROUP BY status ORDER BY n DESC, status";
        Ok(query_all(self.conn, sql, [], |row| {
            let status: String = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok(StatusCount {
                status: decode_enum(&status)?,
                count: u64::try_from(count).unwrap_or_default(),
            })
        })?)
    }
}

fn map_help_row(row: &rusqlite::Row<'_>) -> Result<HelpRequest, DbError> {
    let id: String = row.get(0)?;
    let ticket_code: String = row.get(1)?;
    let request_type: String = row.get(5)?;
    let urgency: String = row.get(7)?;
    let status: String = row.get(8)?;
    let assigned_worker: Option<String> = row.get(10)?;
    let created_at: String = row.get(11)?;
    let updated_at: String = row.get(12)?;

    Ok(HelpRequest {
        id: parse_stored(&id)?,
        ticket_code: parse_stored(&ticket_code)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        location: row.get(4)?,
        request_type: decode_enum(&request_type)?,
        description: row.get(6)?,
        urgency: decode_enum(&urgency)?,
        status: decode_enum(&status)?,
        response: row.get(9)?,
        assigned_worker: assigned_worker.as_deref().map(parse_stored).transpose()?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Duration;
    use mb_core::types::{HelpStatus, RequestType, Urgency};

    fn request(code: TicketCode, created_at: DateTime<Utc>) -> HelpRequest {
        HelpRequest {
            id: HelpRequestId::generate(),
            ticket_code: code,
            name: "রহিম".to_string(),
            phone: "01712345678".to_string(),
            location: "মিরপুর".to_string(),
            request_type: RequestType::Emergency,
            description: "জ্বর".to_string(),
            urgency: Urgency::High,
            status: HelpStatus::Pending,
            response: None,
            assigned_worker: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn code(number: u16) -> TicketCode {
        TicketCode::from_parts(0, 0, number).unwrap()
    }

    #[test]
    fn insert_then_lookup_by_id_and_code() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        let stored = request(code(482), Utc::now());
        repo.insert(&stored).unwrap();

        assert_eq!(repo.get(&stored.id).unwrap(), Some(stored.clone()));
        assert_eq!(repo.get_by_code(&code(482)).unwrap(), Some(stored));
        assert_eq!(repo.get_by_code(&code(483)).unwrap(), None);
    }

    #[test]
    fn duplicate_ticket_code_is_reported_as_taken() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        repo.insert(&request(code(100), Utc::now())).unwrap();
        let err = repo.insert(&request(code(100), Utc::now())).unwrap_err();
        assert!(matches!(err, HelpError::TicketCodeTaken));
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn list_is_newest_first_and_filtered() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        let now = Utc::now();
        let old = request(code(101), now - Duration::hours(2));
        let mut mid = request(code(102), now - Duration::hours(1));
        mid.urgency = Urgency::Low;
        let new = request(code(103), now);
        for item in [&mid, &old, &new] {
            repo.insert(item).unwrap();
        }

        let all = repo.list(&HelpRequestFilter::default()).unwrap();
        let ids: Vec<_> = all.iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![new.id.clone(), mid.id.clone(), old.id.clone()]);

        let high = repo
            .list(&HelpRequestFilter {
                urgency: Some(Urgency::High),
                ..HelpRequestFilter::default()
            })
            .unwrap();
        assert_eq!(high.len(), 2);
        assert!(high.iter().all(|r| r.urgency == Urgency::High));
    }

    #[test]
    fn replace_overwrites_status_and_keeps_code() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        let mut stored = request(code(200), Utc::now());
        repo.insert(&stored).unwrap();
        stored.status = HelpStatus::Completed;
        stored.response = Some("সমাধান হয়েছে".to_string());
        repo.replace(&stored).unwrap();

        let loaded = repo.get(&stored.id).unwrap().unwrap();
        assert_eq!(loaded.status, HelpStatus::Completed);
        assert_eq!(loaded.ticket_code, code(200));
        assert_eq!(loaded.response.as_deref(), Some("সমাধান হয়েছে"));
    }

    #[test]
    fn counts_respect_window_and_group_by_status() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        let now = Utc::now();
        repo.insert(&request(code(301), now - Duration::days(10))).unwrap();
        repo.insert(&request(code(302), now - Duration::days(1))).unwrap();
        let mut done = request(code(303), now);
        done.status = HelpStatus::Completed;
        repo.insert(&done).unwrap();

        assert_eq!(repo.count().unwrap(), 3);
        assert_eq!(repo.count_since(now - Duration::days(7)).unwrap(), 2);
        assert_eq!(
            repo.count_by_status().unwrap(),
            vec![
                StatusCount {
                    status: HelpStatus::Pending,
                    count: 2
                },
                StatusCount {
                    status: HelpStatus::Completed,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn delete_reports_whether_a_row_was_removed() {
        let conn = with_test_db().unwrap();
        let repo = HelpRepo::new(&conn);
        let stored = request(code(404), Utc::now());
        repo.insert(&stored).unwrap();
        assert!(repo.delete(&stored.id).unwrap());
        assert!(!repo.delete(&stored.id).unwrap());
    }
}
