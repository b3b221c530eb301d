use crate::util::{
    DbError, count, decode_enum, decode_json, encode_enum, encode_json, from_date, from_rfc3339,
    parse_stored, query_all, query_one, to_date, to_rfc3339,
};
use chrono::{DateTime, Utc};
use mb_core::error::RecordError;
use mb_core::records::MaternalRecordRepository;
use mb_core::types::{Anchor, MaternalRecord, MaternalRecordId, TrackingType, UserFilter};
use rusqlite::Connection;

const COLUMNS: &str = "id, user_id, tracking_type, lmp_date, edd, birth_date, schedule, checkups, profile, created_at, updated_at";

pub struct MaternalRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> MaternalRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl MaternalRecordRepository for MaternalRepo<'_> {
    fn insert(&self, record: &MaternalRecord) -> Result<(), RecordError> {
        let (lmp_date, edd, birth_date) = match record.anchor {
            Anchor::Pregnancy { lmp_date, edd } => (Some(to_date(lmp_date)), Some(to_date(edd)), None),
            Anchor::Child { birth_date } => (None, None, Some(to_date(birth_date))),
        };
        let sql = format!(
            "INSERT INTO maternal_records ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        );
        let params = (
            record.id.as_str(),
            record.user_id.as_str(),
            encode_enum(&record.anchor.tracking_type())?,
            lmp_date,
            edd,
            birth_date,
            encode_json(&record.schedule)?,
            encode_json(&record.checkups)?,
            encode_json(&record.profile)?,
            to_rfc3339(&record.created_at),
            to_rfc3339(&record.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &MaternalRecordId) -> Result<Option<MaternalRecord>, RecordError> {
        let sql = format!("SELECT {COLUMNS} FROM maternal_records WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_maternal_row)?)
    }

    fn list(&self, filter: &UserFilter) -> Result<Vec<MaternalRecord>, RecordError> {
        let sql =
            format!("SELECT {COLUMNS} FROM maternal_records ORDER BY created_at DESC, id DESC");
        let records = query_all(self.conn, &sql, [], map_maternal_row)?;
        Ok(records
            .into_iter()
            .filter(|record| filter.matches(&record.user_id))
            .collect())
    }

    /// Anchor columns are never rewritten; only the mutable parts of a record are.
    fn replace(&self, record: &MaternalRecord) -> Result<(), RecordError> {
        let sql = "UPDATE maternal_records SET schedule = ?1, checkups = ?2, profile = ?3, updated_at = ?4 WHERE id = ?5";
        let params = (
            encode_json(&record.schedule)?,
            encode_json(&record.checkups)?,
            encode_json(&record.profile)?,
            to_rfc3339(&record.updated_at),
            record.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(RecordError::NotFound { kind: "Record" });
        }
        Ok(())
    }

    fn delete(&self, id: &MaternalRecordId) -> Result<bool, RecordError> {
        let changed = self
            .conn
            .execute("DELETE FROM maternal_records WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RecordError> {
        Ok(count(
            self.conn,
            "SELECT COUNT(*) FROM maternal_records WHERE created_at >= ?1",
            [to_rfc3339(&since)],
        )?)
    }
}

fn map_maternal_row(row: &rusqlite::Row<'_>) -> Result<MaternalRecord, DbError> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let tracking_type: String = row.get(2)?;
    let lmp_date: Option<String> = row.get(3)?;
    let edd: Option<String> = row.get(4)?;
    let birth_date: Option<String> = row.get(5)?;
    let schedule: String = row.get(6)?;
    let checkups: String = row.get(7)?;
    let profile: String = row.get(8)?;
    let created_at: String = row.get(9)?;
    let updated_at: String = row.get(10)?;

    let missing = |column: &str| DbError::InvalidValue {
        message: format!("maternal record {id} has no {column}"),
    };
    let anchor = match decode_enum::<TrackingType>(&tracking_type)? {
        TrackingType::Pregnancy => Anchor::Pregnancy {
            lmp_date: from_date(lmp_date.as_deref().ok_or_else(|| missing("lmp_date"))?)?,
            edd: from_date(edd.as_deref().ok_or_else(|| missing("edd"))?)?,
        },
        TrackingType::Child => Anchor::Child {
            birth_date: from_date(birth_date.as_deref().ok_or_else(|| missing("birth_date"))?)?,
        },
    };

    Ok(MaternalRecord {
        id: parse_stored(&id)?,
        user_id: parse_stored(&user_id)?,
        anchor,
        schedule: decode_json(&schedule)?,
        checkups: decode_json(&checkups)?,
        profile: decode_json(&profile)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::NaiveDate;
    use mb_core::schedule::{child_schedule, pregnancy_anchor, pregnancy_schedule};
    use mb_core::types::{AnonymousId, Checkup, MaternalProfile};

    fn pregnancy() -> MaternalRecord {
        let lmp = NaiveDate::from_ymd_opt(2025, 8, 1).unwrap();
        let now = Utc::now();
        MaternalRecord {
            id: MaternalRecordId::generate(),
            user_id: AnonymousId::new("sample_mother_1".to_string()).unwrap(),
            anchor: pregnancy_anchor(lmp),
            schedule: pregnancy_schedule(lmp),
            checkups: Vec::new(),
            profile: MaternalProfile {
                mother_name: Some("ফাতিমা".to_string()),
                village: Some("চরপাড়া".to_string()),
                ..MaternalProfile::default()
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn pregnancy_record_round_trips() {
        let conn = with_test_db().unwrap();
        let repo = MaternalRepo::new(&conn);
        let stored = pregnancy();
        repo.insert(&stored).unwrap();
        assert_eq!(repo.get(&stored.id).unwrap(), Some(stored));
    }

    #[test]
    fn child_record_round_trips() {
        let conn = with_test_db().unwrap();
        let repo = MaternalRepo::new(&conn);
        let birth_date = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
        let stored = MaternalRecord {
            anchor: Anchor::Child { birth_date },
            schedule: child_schedule(birth_date),
            ..pregnancy()
        };
        repo.insert(&stored).unwrap();
        let loaded = repo.get(&stored.id).unwrap().unwrap();
        assert_eq!(loaded.anchor, Anchor::Child { birth_date });
        assert_eq!(loaded.schedule.len(), 6);
    }

    #[test]
    fn replace_updates_progress_but_not_anchor() {
        let conn = with_test_db().unwrap();
        let repo = MaternalRepo::new(&conn);
        let mut stored = pregnancy();
        repo.insert(&stored).unwrap();
        let original_anchor = stored.anchor;
        stored.schedule[1].completed = true;
        stored.checkups.push(Checkup {
            date: NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
            weight: Some(55.5),
            blood_pressure: Some("110/70".to_string()),
            notes: None,
            next_checkup_date: None,
        });
        stored.anchor = pregnancy_anchor(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        repo.replace(&stored).unwrap();

        let loaded = repo.get(&stored.id).unwrap().unwrap();
        assert!(loaded.schedule[1].completed);
        assert!(!loaded.schedule[0].completed);
        assert_eq!(loaded.checkups.len(), 1);
        assert_eq!(loaded.anchor, original_anchor);
    }
}
