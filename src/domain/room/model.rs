//! Room domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Bookable room, aggregate root for availability windows
#[derive(Debug, Clone)]
pub struct Room {
    pub id: i32,
    pub property_id: i32,
    pub name: String,
    /// Nightly base price before any peak-season adjustment
    pub base_price: Decimal,
    pub max_guests: i32,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}
