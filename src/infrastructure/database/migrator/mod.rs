//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20260201_000001_create_properties;
mod m20260201_000002_create_rooms;
mod m20260201_000003_create_peak_season_rates;
mod m20260201_000004_create_property_rate_settings;
mod m20260201_000005_create_room_availabilities;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260201_000001_create_properties::Migration),
            Box::new(m20260201_000002_create_rooms::Migration),
            Box::new(m20260201_000003_create_peak_season_rates::Migration),
            Box::new(m20260201_000004_create_property_rate_settings::Migration),
            Box::new(m20260201_000005_create_room_availabilities::Migration),
        ]
    }
}
