pub mod model;
pub mod repository;

pub use model::{AdjustmentType, PeakSeasonRate, RateSource};
pub use repository::PeakSeasonRateRepository;
