//! Availability DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::availability::RoomAvailability;

/// One unavailability window
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub id: i32,
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// true = tenant block, false = booking-derived
    pub is_manual: bool,
}

impl From<RoomAvailability> for AvailabilityDto {
    fn from(r: RoomAvailability) -> Self {
        Self {
            id: r.id,
            room_id: r.room_id,
            start_date: r.start_date,
            end_date: r.end_date,
            is_manual: r.is_manual,
        }
    }
}

/// Block a room for an inclusive date range
#[derive(Debug, Deserialize, ToSchema)]
pub struct BlockDatesRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
