use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::TrackerError;

use super::{DateWindow, Entry};

const MAX_OCCURRENCES: usize = 1024;

/// One concrete calendar-date instance of an entry's cadence. Derived fresh
/// on every query and never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Occurrence<'a> {
    pub entry_id: Uuid,
    pub date: NaiveDate,
    pub entry: &'a Entry,
}

/// Enumerates every occurrence of `entry` inside `window`, ascending.
///
/// Occurrence k is measured from the entry's start date, so month-based
/// cadences keep the anchor's day-of-month across short months. The walk
/// skips forward one step at a time until the window is reached and stops as
/// soon as the window end or the entry's end date is passed. Paused entries
/// yield nothing.
pub fn generate_occurrences<'a>(entry: &'a Entry, window: DateWindow) -> Vec<Occurrence<'a>> {
    let mut occurrences = Vec::new();
    if entry.is_paused {
        return occurrences;
    }

    let mut index = 0u32;
    let mut current = entry.start_date;
    while current < window.start {
        index += 1;
        current = entry.frequency.date_at(entry.start_date, index);
    }

    while current <= window.end {
        if let Some(end_date) = entry.end_date {
            if current > end_date {
                break;
            }
        }
        occurrences.push(Occurrence {
            entry_id: entry.id,
            date: current,
            entry,
        });
        if occurrences.len() >= MAX_OCCURRENCES {
            break;
        }
        index += 1;
        current = entry.frequency.date_at(entry.start_date, index);
    }

    occurrences
}

/// Groups the occurrences of all entries by date. Only dates with at least
/// one occurrence appear; each date's list keeps entry iteration order.
pub fn occurrences_by_date<'a>(
    entries: &'a [Entry],
    window: DateWindow,
) -> BTreeMap<NaiveDate, Vec<Occurrence<'a>>> {
    let mut map: BTreeMap<NaiveDate, Vec<Occurrence<'a>>> = BTreeMap::new();
    for entry in entries {
        for occurrence in generate_occurrences(entry, window) {
            map.entry(occurrence.date).or_default().push(occurrence);
        }
    }
    map
}

/// Day-indexed occurrences for a full calendar month, pre-seeded with every
/// day of the month so calendar consumers need no existence checks.
pub fn month_occurrences<'a>(
    entries: &'a [Entry],
    year: i32,
    month: u32,
) -> Result<BTreeMap<NaiveDate, Vec<Occurrence<'a>>>, TrackerError> {
    let window = DateWindow::month(year, month)?;
    let mut map: BTreeMap<NaiveDate, Vec<Occurrence<'a>>> = BTreeMap::new();
    for day in window.days() {
        map.insert(day, Vec::new());
    }
    for entry in entries {
        for occurrence in generate_occurrences(entry, window) {
            map.entry(occurrence.date).or_default().push(occurrence);
        }
    }
    Ok(map)
}

/// Occurrences falling on a single date, in entry iteration order.
pub fn date_occurrences<'a>(entries: &'a [Entry], date: NaiveDate) -> Vec<Occurrence<'a>> {
    let window = DateWindow { start: date, end: date };
    let mut occurrences = Vec::new();
    for entry in entries {
        occurrences.extend(generate_occurrences(entry, window));
    }
    occurrences
}

/// Rollup of a period: amount total, occurrence count, and the flattened
/// occurrence list. Absent amounts count as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary<'a> {
    pub total_amount: f64,
    pub occurrence_count: usize,
    pub occurrences: Vec<Occurrence<'a>>,
}

pub fn period_summary<'a>(entries: &'a [Entry], window: DateWindow) -> PeriodSummary<'a> {
    let mut total_amount = 0.0;
    let mut occurrences = Vec::new();
    for entry in entries {
        for occurrence in generate_occurrences(entry, window) {
            total_amount += occurrence.entry.amount.unwrap_or(0.0);
            occurrences.push(occurrence);
        }
    }
    PeriodSummary {
        total_amount,
        occurrence_count: occurrences.len(),
        occurrences,
    }
}
