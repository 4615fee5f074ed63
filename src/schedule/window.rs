use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

use super::frequency::{days_in_month, shift_month};

/// Inclusive date range over which occurrences and summaries are computed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TrackerError> {
        if end < start {
            return Err(TrackerError::Validation(
                "window end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Full calendar month.
    pub fn month(year: i32, month: u32) -> Result<Self, TrackerError> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            TrackerError::Validation(format!("invalid month {year}-{month:02}"))
        })?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .expect("last day of a valid month");
        Ok(Self { start, end })
    }

    /// Sunday-anchored calendar week containing `reference`.
    pub fn week_of(reference: NaiveDate) -> Self {
        let back = reference.weekday().num_days_from_sunday() as i64;
        let start = reference - Duration::days(back);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// First day of the month `months - 1` months before the reference month
    /// through the last day of the reference month. Quarter and half-year
    /// rollups are `trailing_months(reference, 3)` and `(reference, 6)`.
    pub fn trailing_months(reference: NaiveDate, months: u32) -> Self {
        let month_start = reference.with_day(1).expect("day 1 always valid");
        let start = shift_month(month_start, -(months.saturating_sub(1) as i32));
        let end = NaiveDate::from_ymd_opt(
            reference.year(),
            reference.month(),
            days_in_month(reference.year(), reference.month()),
        )
        .expect("last day of a valid month");
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every day of the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}
