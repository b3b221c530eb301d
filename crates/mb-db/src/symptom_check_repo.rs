use crate::util::{
    DbError, decode_enum, encode_enum, from_rfc3339, parse_stored, query_all, query_one,
    to_rfc3339,
};
use mb_core::error::RecordError;
use mb_core::records::SymptomCheckRepository;
use mb_core::types::{SymptomCheck, SymptomCheckId, UserFilter, Verdict};
use rusqlite::Connection;

const COLUMNS: &str = "id, user_id, symptom, sub_question, answer, age, severity, message, icon, check_date, created_at";

pub struct SymptomCheckRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> SymptomCheckRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl SymptomCheckRepository for SymptomCheckRepo<'_> {
    fn insert(&self, check: &SymptomCheck) -> Result<(), RecordError> {
        let sql = format!(
            "INSERT INTO symptom_checks ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
        );
        let params = (
            check.id.as_str(),
            check.user_id.as_str(),
            check.symptom.as_str(),
            check.sub_question.as_str(),
            check.answer.as_str(),
            check.age,
            encode_enum(&check.result.severity)?,
            check.result.message.as_str(),
            check.result.icon.as_str(),
            to_rfc3339(&check.check_date),
            to_rfc3339(&check.created_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &SymptomCheckId) -> Result<Option<SymptomCheck>, RecordError> {
        let sql = format!("SELECT {COLUMNS} FROM symptom_checks WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_check_row)?)
    }

    fn list(&self, filter: &UserFilter) -> Result<Vec<SymptomCheck>, RecordError> {
        let sql =
            format!("SELECT {COLUMNS} FROM symptom_checks ORDER BY check_date DESC, id DESC");
        let checks = query_all(self.conn, &sql, [], map_check_row)?;
        Ok(checks
            .into_iter()
            .filter(|check| filter.matches(&check.user_id))
            .collect())
    }

    fn delete(&self, id: &SymptomCheckId) -> Result<bool, RecordError> {
        let changed = self
            .conn
            .execute("DELETE FROM symptom_checks WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }
}

fn map_check_row(row: &rusqlite::Row<'_>) -> Result<SymptomCheck, DbError> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let severity: String = row.get(6)?;
    let check_date: String = row.get(9)?;
    let created_at: String = row.get(10)?;

    Ok(SymptomCheck {
        id: parse_stored(&id)?,
        user_id: parse_stored(&user_id)?,
        symptom: row.get(2)?,
        sub_question: row.get(3)?,
        answer: row.get(4)?,
        age: row.get(5)?,
        result: Verdict {
            severity: decode_enum(&severity)?,
            message: row.get(7)?,
            icon: row.get(8)?,
        },
        check_date: from_rfc3339(&check_date)?,
        created_at: from_rfc3339(&created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Utc;
    use mb_core::symptom_tree::evaluate;
    use mb_core::types::AnonymousId;

    fn check(user: &str) -> SymptomCheck {
        let outcome = evaluate("fever", "over-3-days").unwrap();
        let now = Utc::now();
        SymptomCheck {
            id: SymptomCheckId::generate(),
            user_id: AnonymousId::new(user.to_string()).unwrap(),
            symptom: outcome.symptom,
            sub_question: outcome.sub_question,
            answer: outcome.answer,
            age: Some(34),
            result: outcome.verdict,
            check_date: now,
            created_at: now,
        }
    }

    #[test]
    fn stored_check_keeps_its_verdict() {
        let conn = with_test_db().unwrap();
        let repo = SymptomCheckRepo::new(&conn);
        let stored = check("user_a");
        repo.insert(&stored).unwrap();
        assert_eq!(repo.get(&stored.id).unwrap(), Some(stored));
    }

    #[test]
    fn list_filters_by_user_and_delete_removes() {
        let conn = with_test_db().unwrap();
        let repo = SymptomCheckRepo::new(&conn);
        let mine = check("user_a");
        repo.insert(&mine).unwrap();
        repo.insert(&check("user_b")).unwrap();
        let filter = UserFilter {
            user_id: Some(AnonymousId::new("user_a".to_string()).unwrap()),
        };
        assert_eq!(repo.list(&filter).unwrap(), vec![mine.clone()]);
        assert!(repo.delete(&mine.id).unwrap());
        assert!(repo.list(&filter).unwrap().is_empty());
    }
}
