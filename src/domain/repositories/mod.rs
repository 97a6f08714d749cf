//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` — unified access to all per-aggregate repositories
//! - `DomainResult` — standard result type for domain operations

use super::availability::RoomAvailabilityRepository;
use super::property::PropertyRepository;
use super::rate::PeakSeasonRateRepository;
use super::rate_setting::RateSettingRepository;
use super::room::RoomRepository;
use crate::shared::types::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let property = repos.properties().find_by_id(12).await?;
///     let rates = repos.rates().find_live_for_property(12).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn properties(&self) -> &dyn PropertyRepository;
    fn rooms(&self) -> &dyn RoomRepository;
    fn rates(&self) -> &dyn PeakSeasonRateRepository;
    fn rate_settings(&self) -> &dyn RateSettingRepository;
    fn availability(&self) -> &dyn RoomAvailabilityRepository;
}
