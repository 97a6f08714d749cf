pub mod availability;
pub mod holiday;
pub mod property;
pub mod rate;
pub mod rate_setting;
pub mod repositories;
pub mod room;

// Re-export commonly used types
pub use availability::RoomAvailability;
pub use holiday::{Holiday, HolidayCalendar, LongWeekend};
pub use property::Property;
pub use rate::{AdjustmentType, PeakSeasonRate, RateSource};
pub use rate_setting::PropertyRateSetting;
pub use repositories::{DomainResult, RepositoryProvider};
pub use room::Room;

// Re-export DomainError from shared for convenience
pub use crate::shared::types::DomainError;
