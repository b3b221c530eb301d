use crate::MonBondhuError;
use crate::directory::{
    EventRepository, HealthCenterRepository, HealthTipRepository, WorkerRepository,
};
use crate::help::HelpRepository;
use crate::records::{MaternalRecordRepository, MentalRecordRepository, SymptomCheckRepository};

pub trait Store {
    type Help<'a>: HelpRepository
    where
        Self: 'a;
    type Mental<'a>: MentalRecordRepository
    where
        Self: 'a;
    type Maternal<'a>: MaternalRecordRepository
    where
        Self: 'a;
    type SymptomChecks<'a>: SymptomCheckRepository
    where
        Self: 'a;
    type Centers<'a>: HealthCenterRepository
    where
        Self: 'a;
    type Tips<'a>: HealthTipRepository
    where
        Self: 'a;
    type Workers<'a>: WorkerRepository
    where
        Self: 'a;
    type Events<'a>: EventRepository
    where
        Self: 'a;

    fn help(&self) -> Self::Help<'_>;
    fn mental(&self) -> Self::Mental<'_>;
    fn maternal(&self) -> Self::Maternal<'_>;
    fn symptom_checks(&self) -> Self::SymptomChecks<'_>;
    fn centers(&self) -> Self::Centers<'_>;
    fn tips(&self) -> Self::Tips<'_>;
    fn workers(&self) -> Self::Workers<'_>;
    fn events(&self) -> Self::Events<'_>;

    fn with_tx<F, T>(&self, f: F) -> Result<T, MonBondhuError>
    where
        F: FnOnce(&Self) -> Result<T, MonBondhuError>;
}
