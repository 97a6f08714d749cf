//! Room availability management
//!
//! Creates and removes unavailability windows for rooms, invoked by the
//! booking flow (non-manual rows) and by tenant-initiated blocks (manual
//! rows). Both paths share one range-overlap rule; the check and the
//! insert run as a single atomic repository operation so concurrent
//! bookings for the same room cannot both succeed.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::availability::RoomAvailability;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, Room};
use crate::shared::validations::validate_date_range;

pub struct RoomAvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RoomAvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Booking path. `check_in`/`check_out` use hotel semantics: the
    /// checkout day itself is bookable again, so the stored window
    /// covers `[check_in, check_out - 1]`.
    pub async fn set_unavailability(
        &self,
        room_id: i32,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<RoomAvailability> {
        self.find_room(room_id).await?;

        if check_out <= check_in {
            return Err(DomainError::InvalidDate(format!(
                "checkout {} must be after check-in {}",
                check_out, check_in
            )));
        }
        let last_night = check_out.pred_opt().expect("date underflow");

        self.repos
            .availability()
            .insert_if_vacant(RoomAvailability::new(room_id, check_in, last_night, false))
            .await
    }

    /// Tenant-initiated manual block, inclusive date range.
    pub async fn block_dates(
        &self,
        tenant_id: Uuid,
        room_id: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<RoomAvailability> {
        let room = self.find_room(room_id).await?;
        self.ensure_room_ownership(tenant_id, &room).await?;
        validate_date_range(start, end)?;

        self.repos
            .availability()
            .insert_if_vacant(RoomAvailability::new(room_id, start, end, true))
            .await
            .map_err(|e| match e {
                // tenant-facing wording for the manual path
                DomainError::RoomUnavailable { start, end, .. } => DomainError::InvalidDate(
                    format!("{}..{} overlaps an existing unavailability window", start, end),
                ),
                other => other,
            })
    }

    /// Tenant calendar view: every live window for one of their rooms.
    pub async fn room_windows(
        &self,
        tenant_id: Uuid,
        room_id: i32,
    ) -> DomainResult<Vec<RoomAvailability>> {
        let room = self.find_room(room_id).await?;
        self.ensure_room_ownership(tenant_id, &room).await?;
        self.repos.availability().find_live_for_room(room_id).await
    }

    /// Booking cancellation/rejection path: release the window.
    pub async fn remove_unavailability(&self, availability_id: i32) -> DomainResult<()> {
        self.find_live_row(availability_id).await?;
        self.repos
            .availability()
            .soft_delete(availability_id, Utc::now())
            .await
    }

    /// Tenant unblock: verifies ownership of both the room and the row,
    /// and refuses to touch booking-derived windows.
    pub async fn unblock_dates(&self, tenant_id: Uuid, availability_id: i32) -> DomainResult<()> {
        let row = self.find_live_row(availability_id).await?;
        let room = self.find_room(row.room_id).await?;
        self.ensure_room_ownership(tenant_id, &room).await?;

        if !row.is_manual {
            return Err(DomainError::InvalidRequest(
                "booking-derived windows are released by the booking flow, not unblocked".into(),
            ));
        }
        self.repos
            .availability()
            .soft_delete(availability_id, Utc::now())
            .await
    }

    /// Room deletion guard: live booking-derived rows block deletion.
    pub async fn guard_room_deletion(&self, room_id: i32) -> DomainResult<()> {
        let bookings = self.repos.availability().count_booking_rows(room_id).await?;
        if bookings > 0 {
            return Err(DomainError::InvalidRequest(format!(
                "room {} has {} active bookings; resolve with customer first",
                room_id, bookings
            )));
        }
        Ok(())
    }

    /// Property-deletion cascade: only manual rows may be bulk-removed.
    /// Any live booking-derived row under the property blocks the whole
    /// operation.
    pub async fn release_manual_blocks(&self, property_id: i32) -> DomainResult<u64> {
        let rooms = self.repos.rooms().find_by_property(property_id).await?;
        for room in &rooms {
            self.guard_room_deletion(room.id).await?;
        }

        let now = Utc::now();
        let mut removed = 0u64;
        for room in &rooms {
            removed += self
                .repos
                .availability()
                .soft_delete_manual_for_room(room.id, now)
                .await?;
        }
        Ok(removed)
    }

    async fn find_room(&self, room_id: i32) -> DomainResult<Room> {
        self.repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(room_id))
    }

    async fn find_live_row(&self, availability_id: i32) -> DomainResult<RoomAvailability> {
        self.repos
            .availability()
            .find_by_id(availability_id)
            .await?
            .filter(|r| r.is_live())
            .ok_or_else(|| DomainError::availability_not_found(availability_id))
    }

    async fn ensure_room_ownership(&self, tenant_id: Uuid, room: &Room) -> DomainResult<()> {
        let property = self
            .repos
            .properties()
            .find_by_id(room.property_id)
            .await?
            .ok_or_else(|| DomainError::property_not_found(room.property_id))?;
        if !property.is_owned_by(tenant_id) {
            return Err(DomainError::Unauthorized(format!(
                "tenant {} does not own room {}",
                tenant_id, room.id
            )));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use chrono::Duration;
    use rust_decimal_macros::dec;

    fn future(days: i64) -> NaiveDate {
        Utc::now().date_naive() + Duration::days(days)
    }

    fn setup() -> (Arc<InMemoryRepositoryProvider>, Uuid, RoomAvailabilityService) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let tenant = Uuid::new_v4();
        repos.seed_property(1, tenant, "Seaside Villa");
        repos.seed_room(10, 1, "Garden Room", dec!(100.00));
        let service = RoomAvailabilityService::new(repos.clone());
        (repos, tenant, service)
    }

    #[tokio::test]
    async fn booking_stores_checkout_exclusive_window() {
        let (_, _, service) = setup();
        let row = service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        assert_eq!(row.start_date, future(10));
        assert_eq!(row.end_date, future(11));
        assert!(!row.is_manual);
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected() {
        let (_, _, service) = setup();
        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();

        // Jun 11–13 shares the night of the 11th
        let err = service
            .set_unavailability(10, future(11), future(13))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));
    }

    #[tokio::test]
    async fn back_to_back_bookings_share_checkout_day() {
        let (_, _, service) = setup();
        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        // checkout on the 12th, next check-in the same day
        service
            .set_unavailability(10, future(12), future(14))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn concurrent_bookings_cannot_both_win() {
        let (_, _, service) = setup();
        let service = Arc::new(service);
        let (a, b) = tokio::join!(
            service.set_unavailability(10, future(10), future(12)),
            service.set_unavailability(10, future(11), future(13)),
        );
        assert!(a.is_ok() != b.is_ok(), "exactly one booking must win");
    }

    #[tokio::test]
    async fn inverted_or_empty_stay_is_invalid() {
        let (_, _, service) = setup();
        let err = service
            .set_unavailability(10, future(12), future(12))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let (_, _, service) = setup();
        let err = service
            .set_unavailability(99, future(10), future(12))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Room", .. }));
    }

    #[tokio::test]
    async fn manual_block_requires_ownership() {
        let (_, _, service) = setup();
        let err = service
            .block_dates(Uuid::new_v4(), 10, future(5), future(7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn manual_block_rejects_past_and_overlap_as_invalid_date() {
        let (_, tenant, service) = setup();
        let err = service
            .block_dates(tenant, 10, future(-1), future(2))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));

        service
            .block_dates(tenant, 10, future(5), future(7))
            .await
            .unwrap();
        let err = service
            .block_dates(tenant, 10, future(6), future(9))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn manual_block_cannot_overlap_booking_row() {
        let (_, tenant, service) = setup();
        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        let err = service
            .block_dates(tenant, 10, future(11), future(15))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
    }

    #[tokio::test]
    async fn removed_window_frees_the_dates() {
        let (_, _, service) = setup();
        let row = service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        service.remove_unavailability(row.id).await.unwrap();

        // the same window can be booked again
        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();

        // removing twice is a not-found
        let err = service.remove_unavailability(row.id).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::NotFound { entity: "RoomAvailability", .. }
        ));
    }

    #[tokio::test]
    async fn room_windows_lists_live_rows_for_owner_only() {
        let (_, tenant, service) = setup();
        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        let block = service
            .block_dates(tenant, 10, future(20), future(22))
            .await
            .unwrap();

        let windows = service.room_windows(tenant, 10).await.unwrap();
        assert_eq!(windows.len(), 2);

        service.unblock_dates(tenant, block.id).await.unwrap();
        let windows = service.room_windows(tenant, 10).await.unwrap();
        assert_eq!(windows.len(), 1);

        let err = service.room_windows(Uuid::new_v4(), 10).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn unblock_checks_ownership_and_row_kind() {
        let (_, tenant, service) = setup();
        let block = service
            .block_dates(tenant, 10, future(5), future(7))
            .await
            .unwrap();

        let err = service
            .unblock_dates(Uuid::new_v4(), block.id)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Unauthorized(_)));

        service.unblock_dates(tenant, block.id).await.unwrap();

        // booking-derived rows cannot be unblocked by the tenant
        let booking = service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        let err = service.unblock_dates(tenant, booking.id).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn room_deletion_blocked_by_bookings_not_blocks() {
        let (_, tenant, service) = setup();
        service
            .block_dates(tenant, 10, future(5), future(7))
            .await
            .unwrap();
        service.guard_room_deletion(10).await.unwrap();

        service
            .set_unavailability(10, future(10), future(12))
            .await
            .unwrap();
        let err = service.guard_room_deletion(10).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn property_cascade_removes_only_manual_rows() {
        let (repos, tenant, service) = setup();
        repos.seed_room(11, 1, "Ocean Suite", dec!(180.00));
        service
            .block_dates(tenant, 10, future(5), future(7))
            .await
            .unwrap();
        service
            .block_dates(tenant, 11, future(5), future(7))
            .await
            .unwrap();

        let removed = service.release_manual_blocks(1).await.unwrap();
        assert_eq!(removed, 2);

        // an active booking anywhere under the property blocks the cascade
        service
            .set_unavailability(11, future(10), future(12))
            .await
            .unwrap();
        let err = service.release_manual_blocks(1).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidRequest(_)));
    }
}
