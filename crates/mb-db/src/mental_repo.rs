use crate::util::{
    DbError, count, decode_enum, decode_json, encode_enum, encode_json, from_rfc3339,
    parse_stored, query_all, query_one, to_rfc3339,
};
use chrono::{DateTime, Utc};
use mb_core::error::RecordError;
use mb_core::records::MentalRecordRepository;
use mb_core::types::{MentalHealthRecord, MentalRecordId, Mood, MoodCount, UserFilter};
use rusqlite::Connection;

const COLUMNS: &str =
    "id, user_id, mood, mood_level, activities, notes, date, created_at, updated_at";

pub struct MentalRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> MentalRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl MentalRecordRepository for MentalRepo<'_> {
    fn insert(&self, record: &MentalHealthRecord) -> Result<(), RecordError> {
        let sql = format!(
            "INSERT INTO mental_records ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        );
        let params = (
            record.id.as_str(),
            record.user_id.as_str(),
            record.mood.as_ref().map(encode_enum).transpose()?,
            record.mood_level,
            encode_json(&record.activities)?,
            record.notes.as_deref(),
            to_rfc3339(&record.date),
            to_rfc3339(&record.created_at),
            to_rfc3339(&record.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &MentalRecordId) -> Result<Option<MentalHealthRecord>, RecordError> {
        let sql = format!("SELECT {COLUMNS} FROM mental_records WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_mental_row)?)
    }

    fn list(&self, filter: &UserFilter) -> Result<Vec<MentalHealthRecord>, RecordError> {
        let sql = format!("SELECT {COLUMNS} FROM mental_records ORDER BY date DESC, id DESC");
        let records = query_all(self.conn, &sql, [], map_mental_row)?;
        Ok(records
            .into_iter()
            .filter(|record| filter.matches(&record.user_id))
            .collect())
    }

    fn replace(&self, record: &MentalHealthRecord) -> Result<(), RecordError> {
        let sql = "UPDATE mental_records SET mood = ?1, mood_level = ?2, activities = ?3, notes = ?4, updated_at = ?5 WHERE id = ?6";
        let params = (
            record.mood.as_ref().map(encode_enum).transpose()?,
            record.mood_level,
            encode_json(&record.activities)?,
            record.notes.as_deref(),
            to_rfc3339(&record.updated_at),
            record.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(RecordError::NotFound { kind: "Record" });
        }
        Ok(())
    }

    fn delete(&self, id: &MentalRecordId) -> Result<bool, RecordError> {
        let changed = self
            .conn
            .execute("DELETE FROM mental_records WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count_since(&self, since: DateTime<Utc>) -> Result<u64, RecordError> {
        Ok(count(
            self.conn,
            "SELECT COUNT(*) FROM mental_records WHERE created_at >= ?1",
            [to_rfc3339(&since)],
        )?)
    }

    fn mood_distribution(&self) -> Result<Vec<MoodCount>, RecordError> {
        let sql = "SELECT mood, COUNT(*) AS n FROM mental_records GROUP BY mood ORDER BY n DESC, mood";
        Ok(query_all(self.conn, sql, [], |row| {
            let mood: Option<String> = row.get(0)?;
            let count: i64 = row.get(1)?;
            Ok(MoodCount {
                mood: mood.as_deref().map(decode_enum::<Mood>).transpose()?,
                count: u64::try_from(count).unwrap_or_default(),
            })
        })?)
    }
}

fn map_mental_row(row: &rusqlite::Row<'_>) -> Result<MentalHealthRecord, DbError> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let mood: Option<String> = row.get(2)?;
    let activities: String = row.get(4)?;
    let date: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(MentalHealthRecord {
        id: parse_stored(&id)?,
        user_id: parse_stored(&user_id)?,
        mood: mood.as_deref().map(decode_enum).transpose()?,
        mood_level: row.get(3)?,
        activities: decode_json(&activities)?,
        notes: row.get(5)?,
        date: from_rfc3339(&date)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Duration;
    use mb_core::types::AnonymousId;

    fn record(user: &str, mood: Option<Mood>, date: DateTime<Utc>) -> MentalHealthRecord {
        MentalHealthRecord {
            id: MentalRecordId::generate(),
            user_id: AnonymousId::new(user.to_string()).unwrap(),
            mood,
            mood_level: Some(6),
            activities: vec!["হাঁটা".to_string()],
            notes: None,
            date,
            created_at: date,
            updated_at: date,
        }
    }

    #[test]
    fn round_trips_bangla_mood_and_activities() {
        let conn = with_test_db().unwrap();
        let repo = MentalRepo::new(&conn);
        let stored = record("user_a", Some(Mood::Sad), Utc::now());
        repo.insert(&stored).unwrap();
        assert_eq!(repo.get(&stored.id).unwrap(), Some(stored));
    }

    #[test]
    fn list_filters_by_user_and_sorts_by_date() {
        let conn = with_test_db().unwrap();
        let repo = MentalRepo::new(&conn);
        let now = Utc::now();
        let older = record("user_a", Some(Mood::Happy), now - Duration::days(2));
        let newer = record("user_a", Some(Mood::Normal), now);
        let other = record("user_b", Some(Mood::Happy), now);
        for item in [&older, &newer, &other] {
            repo.insert(item).unwrap();
        }
        let filter = UserFilter {
            user_id: Some(AnonymousId::new("user_a".to_string()).unwrap()),
        };
        let ids: Vec<_> = repo
            .list(&filter)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(repo.list(&UserFilter::default()).unwrap().len(), 3);
    }

    #[test]
    fn mood_distribution_counts_unnamed_moods_separately() {
        let conn = with_test_db().unwrap();
        let repo = MentalRepo::new(&conn);
        let now = Utc::now();
        for mood in [Some(Mood::Happy), Some(Mood::Happy), None, Some(Mood::Afraid)] {
            repo.insert(&record("anonymous", mood, now)).unwrap();
        }
        let distribution = repo.mood_distribution().unwrap();
        assert_eq!(
            distribution[0],
            MoodCount {
                mood: Some(Mood::Happy),
                count: 2
            }
        );
        assert_eq!(distribution.len(), 3);
        assert_eq!(distribution.iter().map(|c| c.count).sum::<u64>(), 4);
        assert!(distribution.iter().any(|c| c.mood.is_none()));
    }
}
