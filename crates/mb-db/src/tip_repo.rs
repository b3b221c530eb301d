use crate::util::{
    DbError, decode_enum, encode_enum, from_rfc3339, parse_stored, query_all, query_one,
    to_rfc3339,
};
use mb_core::directory::HealthTipRepository;
use mb_core::error::DirectoryError;
use mb_core::types::{HealthTip, HealthTipFilter, HealthTipId};
use rusqlite::Connection;

const COLUMNS: &str =
    "id, title, description, category, season, icon, language, created_at, updated_at";

pub struct TipRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> TipRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl HealthTipRepository for TipRepo<'_> {
    fn insert(&self, tip: &HealthTip) -> Result<(), DirectoryError> {
        let sql = format!(
            "INSERT INTO health_tips ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)"
        );
        let params = (
            tip.id.as_str(),
            tip.title.as_str(),
            tip.description.as_str(),
            tip.category.as_str(),
            tip.season.as_str(),
            tip.icon.as_str(),
            encode_enum(&tip.language)?,
            to_rfc3339(&tip.created_at),
            to_rfc3339(&tip.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &HealthTipId) -> Result<Option<HealthTip>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM health_tips WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_tip_row)?)
    }

    fn list(&self, filter: &HealthTipFilter) -> Result<Vec<HealthTip>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM health_tips ORDER BY created_at DESC, id DESC");
        let tips = query_all(self.conn, &sql, [], map_tip_row)?;
        Ok(tips.into_iter().filter(|tip| filter.matches(tip)).collect())
    }

    fn replace(&self, tip: &HealthTip) -> Result<(), DirectoryError> {
        let sql = "UPDATE health_tips SET title = ?1, description = ?2, category = ?3, season = ?4, icon = ?5, language = ?6, updated_at = ?7 WHERE id = ?8";
        let params = (
            tip.title.as_str(),
            tip.description.as_str(),
            tip.category.as_str(),
            tip.season.as_str(),
            tip.icon.as_str(),
            encode_enum(&tip.language)?,
            to_rfc3339(&tip.updated_at),
            tip.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(DirectoryError::NotFound { kind: "Health tip" });
        }
        Ok(())
    }

    fn delete(&self, id: &HealthTipId) -> Result<bool, DirectoryError> {
        let changed = self
            .conn
            .execute("DELETE FROM health_tips WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }
}

fn map_tip_row(row: &rusqlite::Row<'_>) -> Result<HealthTip, DbError> {
    let id: String = row.get(0)?;
    let language: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;

    Ok(HealthTip {
        id: parse_stored(&id)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        season: row.get(4)?,
        icon: row.get(5)?,
        language: decode_enum(&language)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}
