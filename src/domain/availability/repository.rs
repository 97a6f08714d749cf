//! Room availability repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::RoomAvailability;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomAvailabilityRepository: Send + Sync {
    /// Atomically check that no live row for the room overlaps the new
    /// window, then insert it. The check and the insert execute as one
    /// serialized unit so two concurrent bookings cannot both succeed.
    /// Fails with `RoomUnavailable` on overlap.
    async fn insert_if_vacant(&self, row: RoomAvailability) -> DomainResult<RoomAvailability>;

    /// Find row by ID, soft-deleted rows included
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<RoomAvailability>>;

    /// All live rows for a room
    async fn find_live_for_room(&self, room_id: i32) -> DomainResult<Vec<RoomAvailability>>;

    /// Count of live booking-derived (non-manual) rows for a room
    async fn count_booking_rows(&self, room_id: i32) -> DomainResult<u64>;

    /// Soft-delete one row
    async fn soft_delete(&self, id: i32, at: DateTime<Utc>) -> DomainResult<()>;

    /// Soft-delete every live manual row for a room; returns removed count
    async fn soft_delete_manual_for_room(
        &self,
        room_id: i32,
        at: DateTime<Utc>,
    ) -> DomainResult<u64>;

    /// Hard-delete rows soft-deleted before `cutoff`; returns purged count
    async fn purge_deleted_before(&self, cutoff: DateTime<Utc>) -> DomainResult<u64>;
}
