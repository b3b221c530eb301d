use mb_core::error::MonBondhuError;
use mb_core::store::Store;
use rusqlite::Connection;

use crate::center_repo::CenterRepo;
use crate::event_repo::EventRepo;
use crate::help_repo::HelpRepo;
use crate::maternal_repo::MaternalRepo;
use crate::mental_repo::MentalRepo;
use crate::symptom_check_repo::SymptomCheckRepo;
use crate::tip_repo::TipRepo;
use crate::worker_repo::WorkerRepo;

pub struct DbStore {
    conn: Connection,
}

impl DbStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn tx_error(err: &rusqlite::Error) -> MonBondhuError {
    MonBondhuError::Internal {
        message: err.to_string(),
    }
}

impl Store for DbStore {
    type Help<'a>
        = HelpRepo<'a>
    where
        Self: 'a;
    type Mental<'a>
        = MentalRepo<'a>
    where
        Self: 'a;
    type Maternal<'a>
        = MaternalRepo<'a>
    where
        Self: 'a;
    type SymptomChecks<'a>
        = SymptomCheckRepo<'a>
    where
        Self: 'a;
    type Centers<'a>
        = CenterRepo<'a>
    where
        Self: 'a;
    type Tips<'a>
        = TipRepo<'a>
    where
        Self: 'a;
    type Workers<'a>
        = WorkerRepo<'a>
    where
        Self: 'a;
    type Events<'a>
        = EventRepo<'a>
    where
        Self: 'a;

    fn help(&self) -> Self::Help<'_> {
        HelpRepo::new(&self.conn)
    }

    fn mental(&self) -> Self::Mental<'_> {
        MentalRepo::new(&self.conn)
    }

    fn maternal(&self) -> Self::Maternal<'_> {
        MaternalRepo::new(&self.conn)
    }

    fn symptom_checks(&self) -> Self::SymptomChecks<'_> {
        SymptomCheckRepo::new(&self.conn)
    }

    fn centers(&self) -> Self::Centers<'_> {
        CenterRepo::new(&self.conn)
    }

    fn tips(&self) -> Self::Tips<'_> {
        TipRepo::new(&self.conn)
    }

    fn workers(&self) -> Self::Workers<'_> {
        WorkerRepo::new(&self.conn)
    }

    fn events(&self) -> Self::Events<'_> {
        EventRepo::new(&self.conn)
    }

    fn with_tx<F, T>(&self, f: F) -> Result<T, MonBondhuError>
    where
        F: FnOnce(&Self) -> Result<T, MonBondhuError>,
    {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(|err| tx_error(&err))?;
        match f(self) {
            Ok(value) => {
                self.conn
                    .execute_batch("COMMIT")
                    .map_err(|err| tx_error(&err))?;
                Ok(value)
            }
            Err(err) => {
                self.conn
                    .execute_batch("ROLLBACK")
                    .map_err(|rollback_err| tx_error(&rollback_err))?;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::with_test_db;
    use chrono::Utc;
    use mb_core::error::RecordError;
    use mb_core::records::MentalRecordRepository;
    use mb_core::types::{AnonymousId, MentalHealthRecord, MentalRecordId, Mood, UserFilter};

    fn record() -> MentalHealthRecord {
        let now = Utc::now();
        MentalHealthRecord {
            id: MentalRecordId::generate(),
            user_id: AnonymousId::anonymous(),
            mood: Some(Mood::Normal),
            mood_level: None,
            activities: Vec::new(),
            notes: None,
            date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn failed_transaction_rolls_back_writes() {
        let store = DbStore::new(with_test_db().unwrap());
        let result: Result<(), MonBondhuError> = store.with_tx(|store| {
            store.mental().insert(&record())?;
            Err(RecordError::invalid("abort").into())
        });
        assert!(result.is_err());
        assert!(store.mental().list(&UserFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn successful_transaction_commits() {
        let store = DbStore::new(with_test_db().unwrap());
        store
            .with_tx(|store| Ok(store.mental().insert(&record())?))
            .unwrap();
        assert_eq!(store.mental().list(&UserFilter::default()).unwrap().len(), 1);
    }
}
