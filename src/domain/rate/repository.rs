//! Peak-season rate repository interface

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::model::PeakSeasonRate;
use crate::domain::DomainResult;

#[async_trait]
pub trait PeakSeasonRateRepository: Send + Sync {
    /// Persist a new rate, returning it with its assigned ID
    async fn save(&self, rate: PeakSeasonRate) -> DomainResult<PeakSeasonRate>;

    /// Update an existing rate
    async fn update(&self, rate: PeakSeasonRate) -> DomainResult<()>;

    /// Find rate by ID, soft-deleted rows included
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<PeakSeasonRate>>;

    /// All live rates for a property
    async fn find_live_for_property(&self, property_id: i32) -> DomainResult<Vec<PeakSeasonRate>>;

    /// Live automatic rates whose window intersects `[start, end]`
    async fn find_automatic_in_window(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<PeakSeasonRate>>;

    /// Live rates applicable to `date` at booking instant `at`
    async fn find_applicable(
        &self,
        property_id: i32,
        date: NaiveDate,
        at: DateTime<Utc>,
    ) -> DomainResult<Vec<PeakSeasonRate>>;

    /// Conflict check: does any live rate for the property overlap
    /// `[start, end]`? `exclude_id` skips the rate being updated.
    async fn exists_overlapping(
        &self,
        property_id: i32,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i32>,
    ) -> DomainResult<bool>;

    /// Soft-delete one rate
    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()>;

    /// Hard-delete rows soft-deleted before `cutoff`; returns purged count
    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
}
