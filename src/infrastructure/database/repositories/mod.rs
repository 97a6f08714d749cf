//! SeaORM repository implementations

pub mod availability_repository;
pub mod property_repository;
pub mod rate_repository;
pub mod rate_setting_repository;
pub mod repository_provider;
pub mod room_repository;

pub use availability_repository::SeaOrmRoomAvailabilityRepository;
pub use property_repository::SeaOrmPropertyRepository;
pub use rate_repository::SeaOrmPeakSeasonRateRepository;
pub use rate_setting_repository::SeaOrmRateSettingRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use room_repository::SeaOrmRoomRepository;

use crate::domain::DomainError;

/// Map a SeaORM error into the domain's transient storage error
pub(crate) fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(format!("Database error: {}", e))
}
