pub mod calendar;
pub mod directory;
pub mod directory_api;
pub mod error;
pub mod geo;
pub mod help;
pub mod mon_bondhu;
pub mod records;
pub mod records_api;
pub mod schedule;
pub mod store;
pub mod symptom_tree;
pub mod ticket;
pub mod validation;

pub mod types;

pub use crate::calendar::Calendar;
pub use crate::error::MonBondhuError;
pub use crate::mon_bondhu::MonBondhu;
pub use crate::store::Store;
