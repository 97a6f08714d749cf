pub mod model;
pub mod repository;

pub use model::RoomAvailability;
pub use repository::RoomAvailabilityRepository;
