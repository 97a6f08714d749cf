//! Room availability domain entity
//!
//! A row marks a window during which a room is NOT bookable, either
//! because a booking claimed it or the tenant blocked the dates.
//! Invariant: no two live rows for one room may overlap.

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone)]
pub struct RoomAvailability {
    pub id: i32,
    pub room_id: i32,
    /// First blocked night (inclusive)
    pub start_date: NaiveDate,
    /// Last blocked night (inclusive)
    pub end_date: NaiveDate,
    /// Always false while the row is live
    pub is_available: bool,
    /// true = tenant-initiated block, false = created by a booking
    pub is_manual: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl RoomAvailability {
    /// Build an unavailability window. `id` is assigned on save.
    pub fn new(room_id: i32, start_date: NaiveDate, end_date: NaiveDate, is_manual: bool) -> Self {
        Self {
            id: 0,
            room_id,
            start_date,
            end_date,
            is_available: false,
            is_manual,
            deleted_at: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Inclusive overlap test against another date range
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn new_window_is_live_and_unavailable() {
        let w = RoomAvailability::new(3, d("2026-06-10"), d("2026-06-11"), false);
        assert!(w.is_live());
        assert!(!w.is_available);
        assert!(!w.is_manual);
    }

    #[test]
    fn overlap_shares_single_day() {
        let w = RoomAvailability::new(3, d("2026-06-10"), d("2026-06-11"), false);
        // Jun 10–12 booking stored as nights 10–11; second booking 11–13
        // stored as nights 11–12 shares night 11
        assert!(w.overlaps(d("2026-06-11"), d("2026-06-12")));
        assert!(!w.overlaps(d("2026-06-12"), d("2026-06-13")));
    }

    #[test]
    fn soft_delete_clears_liveness() {
        let mut w = RoomAvailability::new(3, d("2026-06-10"), d("2026-06-11"), true);
        w.soft_delete(Utc::now());
        assert!(!w.is_live());
    }
}
