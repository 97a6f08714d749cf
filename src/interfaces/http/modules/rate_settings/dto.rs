//! Rate settings DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::rate_setting::PropertyRateSetting;

/// Automatic-rate configuration for a property
#[derive(Debug, Serialize, ToSchema)]
pub struct RateSettingDto {
    pub property_id: i32,
    pub use_auto_rates: bool,
    pub holiday_adjustment_rate: Option<Decimal>,
    /// `Percentage` or `Fixed`
    pub holiday_adjustment_type: Option<String>,
    pub long_weekend_adjustment_rate: Option<Decimal>,
    /// `Percentage` or `Fixed`
    pub long_weekend_adjustment_type: Option<String>,
    pub valid_from: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PropertyRateSetting> for RateSettingDto {
    fn from(s: PropertyRateSetting) -> Self {
        Self {
            property_id: s.property_id,
            use_auto_rates: s.use_auto_rates,
            holiday_adjustment_rate: s.holiday_adjustment_rate,
            holiday_adjustment_type: s.holiday_adjustment_type.map(|t| t.to_string()),
            long_weekend_adjustment_rate: s.long_weekend_adjustment_rate,
            long_weekend_adjustment_type: s.long_weekend_adjustment_type.map(|t| t.to_string()),
            valid_from: s.valid_from,
            updated_at: s.updated_at,
        }
    }
}

/// Partial update — send only the fields to change. Saving triggers an
/// immediate six-month reconciliation for the property.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRateSettingRequest {
    pub use_auto_rates: Option<bool>,
    pub holiday_adjustment_rate: Option<Decimal>,
    /// `Percentage` or `Fixed`
    pub holiday_adjustment_type: Option<String>,
    pub long_weekend_adjustment_rate: Option<Decimal>,
    /// `Percentage` or `Fixed`
    pub long_weekend_adjustment_type: Option<String>,
}
