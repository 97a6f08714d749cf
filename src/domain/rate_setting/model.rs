//! Per-property configuration driving automatic rates

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::super::rate::AdjustmentType;

/// One-to-one settings row for a property. Lazily created with automatic
/// rates disabled on first access.
#[derive(Debug, Clone)]
pub struct PropertyRateSetting {
    pub property_id: i32,
    pub use_auto_rates: bool,
    pub holiday_adjustment_rate: Option<Decimal>,
    pub holiday_adjustment_type: Option<AdjustmentType>,
    pub long_weekend_adjustment_rate: Option<Decimal>,
    pub long_weekend_adjustment_type: Option<AdjustmentType>,
    pub valid_from: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl PropertyRateSetting {
    /// Default row created on first access: automatic rates off.
    pub fn disabled(property_id: i32) -> Self {
        let now = Utc::now();
        Self {
            property_id,
            use_auto_rates: false,
            holiday_adjustment_rate: None,
            holiday_adjustment_type: None,
            long_weekend_adjustment_rate: None,
            long_weekend_adjustment_type: None,
            valid_from: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Holiday adjustment, present only when both rate and type are set
    pub fn holiday_adjustment(&self) -> Option<(Decimal, AdjustmentType)> {
        match (self.holiday_adjustment_rate, self.holiday_adjustment_type) {
            (Some(rate), Some(ty)) => Some((rate, ty)),
            _ => None,
        }
    }

    /// Long-weekend adjustment, present only when both rate and type are set
    pub fn long_weekend_adjustment(&self) -> Option<(Decimal, AdjustmentType)> {
        match (
            self.long_weekend_adjustment_rate,
            self.long_weekend_adjustment_type,
        ) {
            (Some(rate), Some(ty)) => Some((rate, ty)),
            _ => None,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
