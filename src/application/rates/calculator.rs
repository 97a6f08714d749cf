//! Adjusted-price calculation
//!
//! Folds all applicable rate adjustments into one price. Multiple rates
//! applying to the same night are cumulative, not replacing: each
//! contributes `base * rate / 100` (percentage) or `rate` (fixed), the
//! contributions are summed, and the result is rounded half-up to two
//! decimal places exactly once at the end.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::rate::{AdjustmentType, PeakSeasonRate};

/// Apply every rate in `rates` on top of `base_price`.
///
/// Deterministic: identical inputs produce a bit-identical Decimal.
pub fn apply_peak_season_rates(base_price: Decimal, rates: &[PeakSeasonRate]) -> Decimal {
    let total: Decimal = rates.iter().map(|r| r.contribution(base_price)).sum();
    round_price(base_price + total)
}

/// Single-adjustment variant for already-resolved rate info.
pub fn apply_adjustment(
    base_price: Decimal,
    adjustment_rate: Decimal,
    adjustment_type: AdjustmentType,
) -> Decimal {
    let contribution = match adjustment_type {
        AdjustmentType::Percentage => base_price * adjustment_rate / Decimal::from(100),
        AdjustmentType::Fixed => adjustment_rate,
    };
    round_price(base_price + contribution)
}

/// Round half-up (away from zero) to 2 decimal places.
fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ── Tests ──────────────────────────────────────────────────────
