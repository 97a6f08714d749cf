//! Peak-season rate domain entity
//!
//! A rate is one time-bounded price adjustment for one property. Manual
//! rates are entered by the owning tenant; automatic rates are generated
//! from the holiday calendar by the reconciler.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// How an adjustment is applied to a base price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentType {
    /// Percentage of the base price (0–100)
    Percentage,
    /// Flat amount added to the base price
    Fixed,
}

impl AdjustmentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "Percentage",
            Self::Fixed => "Fixed",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Fixed" => Self::Fixed,
            _ => Self::Percentage,
        }
    }
}

impl std::fmt::Display for AdjustmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Origin of a rate, used as the stable upsert key during reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Entered by the owning tenant
    Manual,
    /// Generated from a public-holiday calendar entry
    AutoHoliday,
    /// Generated from a long-weekend calendar entry
    AutoLongWeekend,
}

impl RateSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::AutoHoliday => "Automatic - Holiday",
            Self::AutoLongWeekend => "Automatic - Long Weekend",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "Automatic - Holiday" => Self::AutoHoliday,
            "Automatic - Long Weekend" => Self::AutoLongWeekend,
            _ => Self::Manual,
        }
    }

    pub fn is_automatic(&self) -> bool {
        !matches!(self, Self::Manual)
    }
}

impl std::fmt::Display for RateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price adjustment window for one property
#[derive(Debug, Clone)]
pub struct PeakSeasonRate {
    pub id: i32,
    pub property_id: i32,
    /// First night the adjustment covers (inclusive)
    pub start_date: NaiveDate,
    /// Last night the adjustment covers (inclusive)
    pub end_date: NaiveDate,
    pub adjustment_rate: Decimal,
    pub adjustment_type: AdjustmentType,
    pub source: RateSource,
    /// Free text shown to the tenant; only meaningful for manual rates
    pub reason: Option<String>,
    /// Instant the rate becomes effective for booking-time filtering
    pub valid_from: DateTime<Utc>,
    /// Optional instant the rate stops being effective
    pub valid_to: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PeakSeasonRate {
    /// Build a manual rate from tenant input. `id` is assigned on save.
    pub fn new_manual(
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        adjustment_rate: Decimal,
        adjustment_type: AdjustmentType,
        reason: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            property_id,
            start_date,
            end_date,
            adjustment_rate,
            adjustment_type,
            source: RateSource::Manual,
            reason,
            valid_from: now,
            valid_to: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build an automatic rate produced by the reconciler.
    pub fn new_automatic(
        property_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        adjustment_rate: Decimal,
        adjustment_type: AdjustmentType,
        source: RateSource,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            property_id,
            start_date,
            end_date,
            adjustment_rate,
            adjustment_type,
            source,
            reason: None,
            valid_from: now,
            valid_to: None,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Whether this rate applies to night `date` for a booking made at
    /// instant `at`. The date window is capped by `valid_to` when set;
    /// the booking instant must fall inside `[valid_from, valid_to]`.
    pub fn applies_to(&self, date: NaiveDate, at: DateTime<Utc>) -> bool {
        if !self.is_live() {
            return false;
        }
        let last_date = self
            .valid_to
            .map(|t| t.date_naive())
            .unwrap_or(self.end_date);
        if date < self.start_date || date > last_date {
            return false;
        }
        if at < self.valid_from {
            return false;
        }
        match self.valid_to {
            Some(until) => at <= until,
            None => true,
        }
    }

    /// Inclusive overlap test against another date range
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date <= end && self.end_date >= start
    }

    /// Whether the adjustment window has already begun as of `today`,
    /// which freezes `start_date` against updates.
    pub fn has_begun(&self, today: NaiveDate) -> bool {
        today > self.start_date
    }

    /// Contribution this rate adds on top of `base_price`
    pub fn contribution(&self, base_price: Decimal) -> Decimal {
        match self.adjustment_type {
            AdjustmentType::Percentage => {
                base_price * self.adjustment_rate / Decimal::from(100)
            }
            AdjustmentType::Fixed => self.adjustment_rate,
        }
    }

    pub fn soft_delete(&mut self, at: DateTime<Utc>) {
        self.deleted_at = Some(at);
    }
}

// ── Tests ──────────────────────────────────────────────────────
