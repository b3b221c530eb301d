use crate::util::{
    DbError, count, decode_json, encode_json, from_rfc3339, parse_stored, query_all, query_one,
    to_rfc3339,
};
use mb_core::directory::HealthCenterRepository;
use mb_core::error::DirectoryError;
use mb_core::types::{GeoPoint, HealthCenter, HealthCenterFilter, HealthCenterId};
use rusqlite::Connection;

const COLUMNS: &str = "id, name, center_type, division, district, upazila, location_description, services, timing, contact, lat, lng, is_emergency, created_at, updated_at";

pub struct CenterRepo<'a> {
    pub conn: &'a Connection,
}

impl<'a> CenterRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl HealthCenterRepository for CenterRepo<'_> {
    fn insert(&self, center: &HealthCenter) -> Result<(), DirectoryError> {
        let sql = format!(
            "INSERT INTO health_centers ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        );
        let params = (
            center.id.as_str(),
            center.name.as_str(),
            center.center_type.as_str(),
            center.division.as_str(),
            center.district.as_str(),
            center.upazila.as_str(),
            center.location_description.as_str(),
            encode_json(&center.services)?,
            center.timing.as_str(),
            center.contact.as_deref(),
            center.location.map(|point| point.lat),
            center.location.map(|point| point.lng),
            center.is_emergency,
            to_rfc3339(&center.created_at),
            to_rfc3339(&center.updated_at),
        );
        self.conn.execute(&sql, params).map_err(DbError::from)?;
        Ok(())
    }

    fn get(&self, id: &HealthCenterId) -> Result<Option<HealthCenter>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM health_centers WHERE id = ?1");
        Ok(query_one(self.conn, &sql, [id.as_str()], map_center_row)?)
    }

    fn list(&self, filter: &HealthCenterFilter) -> Result<Vec<HealthCenter>, DirectoryError> {
        let sql = format!("SELECT {COLUMNS} FROM health_centers ORDER BY name, id");
        let centers = query_all(self.conn, &sql, [], map_center_row)?;
        Ok(centers
            .into_iter()
            .filter(|center| filter.matches(center))
            .collect())
    }

    fn replace(&self, center: &HealthCenter) -> Result<(), DirectoryError> {
        let sql = "UPDATE health_centers SET name = ?1, center_type = ?2, division = ?3, district = ?4, upazila = ?5, location_description = ?6, services = ?7, timing = ?8, contact = ?9, lat = ?10, lng = ?11, is_emergency = ?12, updated_at = ?13 WHERE id = ?14";
        let params = (
            center.name.as_str(),
            center.center_type.as_str(),
            center.division.as_str(),
            center.district.as_str(),
            center.upazila.as_str(),
            center.location_description.as_str(),
            encode_json(&center.services)?,
            center.timing.as_str(),
            center.contact.as_deref(),
            center.location.map(|point| point.lat),
            center.location.map(|point| point.lng),
            center.is_emergency,
            to_rfc3339(&center.updated_at),
            center.id.as_str(),
        );
        let changed = self.conn.execute(sql, params).map_err(DbError::from)?;
        if changed == 0 {
            return Err(DirectoryError::NotFound {
                kind: "Health center",
            });
        }
        Ok(())
    }

    fn delete(&self, id: &HealthCenterId) -> Result<bool, DirectoryError> {
        let changed = self
            .conn
            .execute("DELETE FROM health_centers WHERE id = ?1", [id.as_str()])
            .map_err(DbError::from)?;
        Ok(changed > 0)
    }

    fn count(&self) -> Result<u64, DirectoryError> {
        Ok(count(self.conn, "SELECT COUNT(*) FROM health_centers", [])?)
    }
}

pub(crate) fn point(lat: Option<f64>, lng: Option<f64>) -> Option<GeoPoint> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Some(GeoPoint { lat, lng }),
        _ => None,
    }
}

fn map_center_row(row: &rusqlite::Row<'_>) -> Result<HealthCenter, DbError> {
    let id: String = row.get(0)?;
    let services: String = row.get(7)?;
    let created_at: String = row.get(13)?;
    let updated_at: String = row.get(14)?;

    Ok(HealthCenter {
        id: parse_stored(&id)?,
        name: row.get(1)?,
        center_type: row.get(2)?,
        division: row.get(3)?,
        district: row.get(4)?,
        upazila: row.get(5)?,
        location_description: row.get(6)?,
        services: decode_json(&services)?,
        timing: row.get(8)?,
        contact: row.get(9)?,
        location: point(row.get(10)?, row.get(11)?),
        is_emergency: row.get(12)?,
        created_at: from_rfc3339(&created_at)?,
        updated_at: from_rfc3339(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Utc;

    fn center(name: &str, emergency: bool, location: Option<GeoPoint>) -> HealthCenter {
        let now = Utc::now();
        HealthCenter {
            id: HealthCenterId::generate(),
            name: name.to_string(),
            center_type: "উপজেলা স্বাস্থ্য কমপ্লেক্স".to_string(),
            division: "ঢাকা".to_string(),
            district: "ঢাকা".to_string(),
            upazila: "সাভার".to_string(),
            location_description: "বাস স্ট্যান্ডের পাশে".to_string(),
            services: vec!["জরুরি".to_string()],
            timing: "২৪ ঘণ্টা".to_string(),
            contact: None,
            location,
            is_emergency: emergency,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn round_trips_with_and_without_coordinates() {
        let conn = with_test_db().unwrap();
        let repo = CenterRepo::new(&conn);
        let located = center(
            "সাভার UHC",
            true,
            Some(GeoPoint {
                lat: 23.85,
                lng: 90.26,
            }),
        );
        let unlocated = center("কমিউনিটি ক্লিনিক", false, None);
        repo.insert(&located).unwrap();
        repo.insert(&unlocated).unwrap();
        assert_eq!(repo.get(&located.id).unwrap(), Some(located));
        assert_eq!(repo.get(&unlocated.id).unwrap(), Some(unlocated));
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn list_applies_emergency_filter() {
        let conn = with_test_db().unwrap();
        let repo = CenterRepo::new(&conn);
        repo.insert(&center("ক", true, None)).unwrap();
        repo.insert(&center("খ", false, None)).unwrap();
        let emergency = repo
            .list(&HealthCenterFilter {
                is_emergency: Some(true),
                ..HealthCenterFilter::default()
            })
            .unwrap();
        assert_eq!(emergency.len(), 1);
        assert!(emergency[0].is_emergency);
    }
}
