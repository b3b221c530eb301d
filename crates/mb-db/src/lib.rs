pub mod center_repo;
pub mod event_repo;
pub mod help_repo;
pub mod maternal_repo;
pub mod mental_repo;
pub mod schema;
pub mod store;
pub mod symptom_check_repo;
pub mod tip_repo;
pub mod util;
pub mod worker_repo;

pub use store::DbStore;
