//! Application layer - business services and use cases

pub mod availability;
pub mod rates;
pub mod scheduler;

pub use availability::RoomAvailabilityService;
pub use rates::{
    PeakSeasonRateService, PricingService, RateSettingsReconciler, RateSettingsService,
    RateValidator,
};
pub use scheduler::{Scheduler, SchedulerConfig};
