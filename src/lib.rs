//! # Roomrate
//!
//! Dynamic pricing and room-availability engine for a vacation-rental
//! platform. Computes adjusted nightly prices by composing time-bounded
//! rate adjustments, keeps automatic holiday/long-weekend rates in sync
//! with an external holiday calendar, and guarantees that no two
//! bookings claim the same room for overlapping dates.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, repository traits and the
//!   holiday-calendar collaborator trait
//! - **application**: Rate validation/mutation, price calculation,
//!   reconciliation, availability management and the scheduler
//! - **infrastructure**: SeaORM persistence, in-memory storage, holiday
//!   API client
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::repositories::SeaOrmRepositoryProvider;
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
