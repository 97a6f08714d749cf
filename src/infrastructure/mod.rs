//! Infrastructure layer - external concerns

pub mod database;
pub mod holiday;
pub mod storage;

pub use database::{init_database, DatabaseConfig};
pub use holiday::NagerHolidayCalendar;
pub use storage::InMemoryRepositoryProvider;
