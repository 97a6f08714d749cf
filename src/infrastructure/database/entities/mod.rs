//! SeaORM entities

pub mod peak_season_rate;
pub mod property;
pub mod property_rate_setting;
pub mod room;
pub mod room_availability;
