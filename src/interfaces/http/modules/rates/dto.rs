//! Rates DTOs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::rates::pricing::{CumulativeDailyRate, DailyRate, RoomRate};
use crate::domain::rate::PeakSeasonRate;

/// Adjusted price for one room on the requested date
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomRateDto {
    pub room_id: i32,
    pub room_name: String,
    /// Nightly price before adjustments
    pub base_price: Decimal,
    /// Price after folding every applicable adjustment
    pub adjusted_price: Decimal,
    /// Number of adjustments that contributed
    pub applied_rates: usize,
}

impl From<RoomRate> for RoomRateDto {
    fn from(r: RoomRate) -> Self {
        Self {
            room_id: r.room_id,
            room_name: r.room_name,
            base_price: r.base_price,
            adjusted_price: r.adjusted_price,
            applied_rates: r.applied_rates,
        }
    }
}

/// Lowest adjusted price for one day
#[derive(Debug, Serialize, ToSchema)]
pub struct DailyRateDto {
    pub date: NaiveDate,
    pub lowest_price: Decimal,
}

impl From<DailyRate> for DailyRateDto {
    fn from(d: DailyRate) -> Self {
        Self {
            date: d.date,
            lowest_price: d.lowest_price,
        }
    }
}

/// Daily lowest price plus the running total up to that day
#[derive(Debug, Serialize, ToSchema)]
pub struct CumulativeDailyRateDto {
    pub date: NaiveDate,
    pub lowest_price: Decimal,
    pub running_total: Decimal,
}

impl From<CumulativeDailyRate> for CumulativeDailyRateDto {
    fn from(d: CumulativeDailyRate) -> Self {
        Self {
            date: d.date,
            lowest_price: d.lowest_price,
            running_total: d.running_total,
        }
    }
}

/// Full rate representation returned from mutations
#[derive(Debug, Serialize, ToSchema)]
pub struct RateDto {
    pub id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adjustment_rate: Decimal,
    /// `Percentage` or `Fixed`
    pub adjustment_type: String,
    /// `Manual`, `Automatic - Holiday` or `Automatic - Long Weekend`
    pub source: String,
    pub reason: Option<String>,
    pub valid_from: DateTime<Utc>,
    pub valid_to: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PeakSeasonRate> for RateDto {
    fn from(r: PeakSeasonRate) -> Self {
        Self {
            id: r.id,
            property_id: r.property_id,
            start_date: r.start_date,
            end_date: r.end_date,
            adjustment_rate: r.adjustment_rate,
            adjustment_type: r.adjustment_type.to_string(),
            source: r.source.to_string(),
            reason: r.reason,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Create a manual peak-season rate
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRateRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub adjustment_rate: Decimal,
    /// `Percentage` or `Fixed`
    pub adjustment_type: String,
    /// Free text shown back to the tenant
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// Partial update of a manual rate — send only the fields to change
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRateRequest {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub adjustment_rate: Option<Decimal>,
    /// `Percentage` or `Fixed`
    pub adjustment_type: Option<String>,
    #[validate(length(max = 255))]
    pub reason: Option<String>,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// `?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD`
#[derive(Debug, Deserialize, IntoParams)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
