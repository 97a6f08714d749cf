pub mod service;

pub use service::RoomAvailabilityService;
