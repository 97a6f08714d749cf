//! Date validation helpers shared by the rate and availability services.

use chrono::{NaiveDate, Utc};

use crate::shared::types::DomainError;

/// Inclusive range-overlap test used everywhere a date window is checked
/// against another: `[a_start, a_end]` intersects `[b_start, b_end]`.
pub fn ranges_overlap(
    a_start: NaiveDate,
    a_end: NaiveDate,
    b_start: NaiveDate,
    b_end: NaiveDate,
) -> bool {
    a_start <= b_end && a_end >= b_start
}

/// Fails with `InvalidDate` if `date` is before `today`.
pub fn validate_date_against(today: NaiveDate, date: NaiveDate) -> Result<(), DomainError> {
    if date < today {
        return Err(DomainError::InvalidDate(format!(
            "{} is in the past",
            date
        )));
    }
    Ok(())
}

/// Fails with `InvalidDate` if `start` is in the past or after `end`.
pub fn validate_date_range_against(
    today: NaiveDate,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<(), DomainError> {
    validate_date_against(today, start)?;
    if start > end {
        return Err(DomainError::InvalidDate(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

pub fn validate_date(date: NaiveDate) -> Result<(), DomainError> {
    validate_date_against(Utc::now().date_naive(), date)
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), DomainError> {
    validate_date_range_against(Utc::now().date_naive(), start, end)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn overlap_cases() {
        // identical
        assert!(ranges_overlap(
            d("2026-06-10"),
            d("2026-06-12"),
            d("2026-06-10"),
            d("2026-06-12")
        ));
        // partial overlap on the right edge
        assert!(ranges_overlap(
            d("2026-06-10"),
            d("2026-06-12"),
            d("2026-06-12"),
            d("2026-06-14")
        ));
        // contained
        assert!(ranges_overlap(
            d("2026-06-01"),
            d("2026-06-30"),
            d("2026-06-10"),
            d("2026-06-12")
        ));
        // adjacent, no shared day
        assert!(!ranges_overlap(
            d("2026-06-10"),
            d("2026-06-12"),
            d("2026-06-13"),
            d("2026-06-14")
        ));
        // disjoint
        assert!(!ranges_overlap(
            d("2026-06-01"),
            d("2026-06-05"),
            d("2026-07-01"),
            d("2026-07-05")
        ));
    }

    #[test]
    fn past_date_rejected() {
        let today = d("2026-06-15");
        assert!(validate_date_against(today, d("2026-06-14")).is_err());
        assert!(validate_date_against(today, d("2026-06-15")).is_ok());
        assert!(validate_date_against(today, d("2026-06-16")).is_ok());
    }

    #[test]
    fn inverted_range_rejected() {
        let today = d("2026-06-15");
        let err = validate_date_range_against(today, d("2026-06-20"), d("2026-06-18"))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidDate(_)));
        assert!(validate_date_range_against(today, d("2026-06-18"), d("2026-06-18")).is_ok());
    }
}
