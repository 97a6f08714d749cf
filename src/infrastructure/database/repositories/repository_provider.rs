//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::availability::RoomAvailabilityRepository;
use crate::domain::property::PropertyRepository;
use crate::domain::rate::PeakSeasonRateRepository;
use crate::domain::rate_setting::RateSettingRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;

use super::availability_repository::SeaOrmRoomAvailabilityRepository;
use super::property_repository::SeaOrmPropertyRepository;
use super::rate_repository::SeaOrmPeakSeasonRateRepository;
use super::rate_setting_repository::SeaOrmRateSettingRepository;
use super::room_repository::SeaOrmRoomRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let property = repos.properties().find_by_id(12).await?;
/// let rates = repos.rates().find_live_for_property(12).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    properties: SeaOrmPropertyRepository,
    rooms: SeaOrmRoomRepository,
    rates: SeaOrmPeakSeasonRateRepository,
    rate_settings: SeaOrmRateSettingRepository,
    availability: SeaOrmRoomAvailabilityRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            properties: SeaOrmPropertyRepository::new(db.clone()),
            rooms: SeaOrmRoomRepository::new(db.clone()),
            rates: SeaOrmPeakSeasonRateRepository::new(db.clone()),
            rate_settings: SeaOrmRateSettingRepository::new(db.clone()),
            availability: SeaOrmRoomAvailabilityRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn properties(&self) -> &dyn PropertyRepository {
        &self.properties
    }

    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn rates(&self) -> &dyn PeakSeasonRateRepository {
        &self.rates
    }

    fn rate_settings(&self) -> &dyn RateSettingRepository {
        &self.rate_settings
    }

    fn availability(&self) -> &dyn RoomAvailabilityRepository {
        &self.availability
    }
}
