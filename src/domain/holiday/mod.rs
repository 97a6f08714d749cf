//! Holiday calendar collaborator
//!
//! The reconciler consumes an external holiday API through this trait;
//! the production implementation lives in `infrastructure::holiday`.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::DomainResult;

/// One public holiday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// A long weekend: consecutive non-working days around a holiday
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongWeekend {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_count: u32,
}

impl LongWeekend {
    /// Every calendar day the long weekend covers
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date.iter_days().take_while(|d| *d <= self.end_date)
    }
}

#[async_trait]
pub trait HolidayCalendar: Send + Sync {
    /// Public holidays with `start <= date <= end`
    async fn holidays_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<Holiday>>;

    /// Long weekends intersecting `[start, end]`
    async fn long_weekends_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DomainResult<Vec<LongWeekend>>;
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_weekend_days_are_inclusive() {
        let lw = LongWeekend {
            start_date: "2026-05-01".parse().unwrap(),
            end_date: "2026-05-03".parse().unwrap(),
            day_count: 3,
        };
        let days: Vec<NaiveDate> = lw.days().collect();
        assert_eq!(days.len(), 3);
        assert_eq!(days[0], "2026-05-01".parse().unwrap());
        assert_eq!(days[2], "2026-05-03".parse().unwrap());
    }
}
