pub mod model;
pub mod repository;

pub use model::PropertyRateSetting;
pub use repository::RateSettingRepository;
