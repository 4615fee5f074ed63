use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// Closed set of recurrence cadences. Unknown tags are rejected at parse
/// time instead of degrading to a daily step.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Frequency {
    /// Fixed day step for the linear cadences, `None` for the month-based ones.
    pub fn step_days(&self) -> Option<i64> {
        match self {
            Frequency::Daily => Some(1),
            Frequency::Weekly => Some(7),
            Frequency::Fortnightly => Some(15),
            _ => None,
        }
    }

    /// Calendar-month step for the month-based cadences.
    pub fn step_months(&self) -> Option<i32> {
        match self {
            Frequency::Monthly => Some(1),
            Frequency::Quarterly => Some(3),
            Frequency::HalfYearly => Some(6),
            Frequency::Yearly => Some(12),
            _ => None,
        }
    }

    /// The `index`-th occurrence date measured from `anchor` (index 0 is the
    /// anchor itself). Month-based cadences add whole calendar months from
    /// the anchor so the anchor's day-of-month survives short months:
    /// Jan 31 monthly yields Feb 29, Mar 31, Apr 30 rather than drifting to
    /// the 29th after the February clamp.
    pub fn date_at(&self, anchor: NaiveDate, index: u32) -> NaiveDate {
        if let Some(days) = self.step_days() {
            return anchor + Duration::days(days * index as i64);
        }
        let months = self.step_months().unwrap_or(1);
        shift_month(anchor, months * index as i32)
    }

    /// Human-facing label for forms and list views.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Fortnightly => "Fortnightly (15 days)",
            Frequency::Monthly => "Monthly",
            Frequency::Quarterly => "3 Monthly",
            Frequency::HalfYearly => "6 Monthly",
            Frequency::Yearly => "Yearly",
        }
    }

    /// Uppercase code used in exported reports.
    pub fn code(&self) -> &'static str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Fortnightly => "FORTNIGHTLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Quarterly => "QUARTERLY",
            Frequency::HalfYearly => "HALFYEARLY",
            Frequency::Yearly => "YEARLY",
        }
    }

    /// Lowercase tag, the canonical serialized form.
    pub fn tag(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Fortnightly => "fortnightly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::HalfYearly => "halfyearly",
            Frequency::Yearly => "yearly",
        }
    }

    /// Upper bound on occurrences within one calendar month, used to size the
    /// per-frequency slot columns of the asset schedule.
    pub fn schedule_slots(&self) -> usize {
        match self {
            Frequency::Daily => 31,
            Frequency::Weekly => 5,
            Frequency::Fortnightly => 3,
            Frequency::Monthly
            | Frequency::Quarterly
            | Frequency::HalfYearly
            | Frequency::Yearly => 1,
        }
    }

    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::Daily,
            Frequency::Weekly,
            Frequency::Fortnightly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::HalfYearly,
            Frequency::Yearly,
        ]
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Frequency {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Frequency::all()
            .iter()
            .find(|freq| freq.tag().eq_ignore_ascii_case(value.trim()))
            .copied()
            .ok_or_else(|| TrackerError::UnknownFrequency(value.to_string()))
    }
}

/// Shifts a date by whole calendar months, clamping the day to the target
/// month's length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let mut year = date.year();
    let mut month = date.month() as i32 + months;
    let mut day = date.day();
    while month > 12 {
        month -= 12;
        year += 1;
    }
    while month < 1 {
        month += 12;
        year -= 1;
    }
    day = day.min(days_in_month(year, month as u32));
    NaiveDate::from_ymd_opt(year, month as u32, day).unwrap_or(date)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .unwrap_or_else(|| NaiveDate::from_ymd_opt(year, month, 28).unwrap());
    let last_current = first_next - Duration::days(1);
    last_current.day()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn linear_steps_use_fixed_day_counts() {
        let anchor = date(2024, 1, 1);
        assert_eq!(Frequency::Daily.date_at(anchor, 1), date(2024, 1, 2));
        assert_eq!(Frequency::Weekly.date_at(anchor, 2), date(2024, 1, 15));
        assert_eq!(Frequency::Fortnightly.date_at(anchor, 1), date(2024, 1, 16));
    }

    #[test]
    fn month_steps_clamp_without_drifting() {
        let anchor = date(2024, 1, 31);
        assert_eq!(Frequency::Monthly.date_at(anchor, 1), date(2024, 2, 29));
        assert_eq!(Frequency::Monthly.date_at(anchor, 2), date(2024, 3, 31));
        assert_eq!(Frequency::Monthly.date_at(anchor, 3), date(2024, 4, 30));
        assert_eq!(Frequency::Quarterly.date_at(anchor, 1), date(2024, 4, 30));
        assert_eq!(Frequency::HalfYearly.date_at(anchor, 1), date(2024, 7, 31));
        assert_eq!(Frequency::Yearly.date_at(anchor, 1), date(2025, 1, 31));
    }

    #[test]
    fn shift_month_handles_year_boundaries() {
        assert_eq!(shift_month(date(2024, 11, 30), 3), date(2025, 2, 28));
        assert_eq!(shift_month(date(2024, 2, 29), -2), date(2023, 12, 29));
    }

    #[test]
    fn parse_rejects_unknown_tags() {
        assert_eq!("monthly".parse::<Frequency>().unwrap(), Frequency::Monthly);
        assert_eq!(
            "HalfYearly".parse::<Frequency>().unwrap(),
            Frequency::HalfYearly
        );
        assert!("biweekly".parse::<Frequency>().is_err());
    }

    #[test]
    fn days_in_month_matches_calendar() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
    }
}
