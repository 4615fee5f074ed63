//! Tabular projections of aggregated occurrences, handed to format-specific
//! renderers. The builders are pure; CSV/TXT rendering lives here because it
//! is text-level, while binary formats stay with external writers.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::schedule::{
    generate_occurrences, month_occurrences, DateWindow, Entry, Frequency, StatusLookup,
};

/// One row of the daily register: a calendar day and everything due on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRow {
    pub serial: u32,
    pub date: NaiveDate,
    pub titles: String,
    pub frequencies: String,
    /// Comma-joined completion labels; present only when the builder was
    /// given a status lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<String>,
}

/// Builds the day-by-day register for a month: one row per calendar day,
/// occurrence-free days included with empty columns.
pub fn month_register(
    entries: &[Entry],
    year: i32,
    month: u32,
    statuses: Option<&StatusLookup>,
) -> Result<Vec<RegisterRow>, TrackerError> {
    let occurrence_map = month_occurrences(entries, year, month)?;
    let mut rows = Vec::with_capacity(occurrence_map.len());

    for (serial, (date, occurrences)) in occurrence_map.iter().enumerate() {
        let titles = occurrences
            .iter()
            .map(|occ| occ.entry.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let frequencies = occurrences
            .iter()
            .map(|occ| occ.entry.frequency.code())
            .collect::<Vec<_>>()
            .join(", ");
        let statuses = statuses.map(|lookup| {
            occurrences
                .iter()
                .map(|occ| lookup.status_for(occ.entry_id, occ.date).register_label())
                .collect::<Vec<_>>()
                .join(", ")
        });
        rows.push(RegisterRow {
            serial: serial as u32 + 1,
            date: *date,
            titles,
            frequencies,
            statuses,
        });
    }

    Ok(rows)
}

/// One row of the asset schedule: per-entry last/next occurrence columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleRow {
    pub serial: u32,
    pub entry_id: Uuid,
    pub title: String,
    pub frequency: Frequency,
    /// Last occurrence strictly before the period, if any.
    pub last_done: Option<NaiveDate>,
    /// In-period occurrences, truncated to the frequency's slot capacity.
    pub upcoming: Vec<NaiveDate>,
}

/// Builds the entry-by-entry schedule for a period. Paused entries are
/// omitted, matching the engine.
pub fn asset_schedule(entries: &[Entry], window: DateWindow) -> Vec<ScheduleRow> {
    let mut rows = Vec::new();
    for entry in entries.iter().filter(|entry| !entry.is_paused) {
        let upcoming: Vec<NaiveDate> = generate_occurrences(entry, window)
            .iter()
            .map(|occ| occ.date)
            .take(entry.frequency.schedule_slots())
            .collect();
        rows.push(ScheduleRow {
            serial: rows.len() as u32 + 1,
            entry_id: entry.id,
            title: entry.title.clone(),
            frequency: entry.frequency,
            last_done: last_occurrence_before(entry, window.start),
            upcoming,
        });
    }
    rows
}

fn last_occurrence_before(entry: &Entry, cutoff: NaiveDate) -> Option<NaiveDate> {
    let mut last = None;
    let mut index = 0u32;
    loop {
        let candidate = entry.frequency.date_at(entry.start_date, index);
        // The step is strictly increasing, so this walk terminates on its
        // own; a fixed cap would silently truncate long-lived series.
        if candidate >= cutoff {
            break;
        }
        if let Some(end_date) = entry.end_date {
            if candidate > end_date {
                break;
            }
        }
        last = Some(candidate);
        index += 1;
    }
    last
}

/// Renders register rows as CSV with the export column set. The status
/// column appears only when the rows carry statuses.
pub fn register_csv(rows: &[RegisterRow]) -> String {
    let with_status = rows.iter().any(|row| row.statuses.is_some());
    let mut out = String::from("S. No.,Date,Title / Description,Frequency");
    if with_status {
        out.push_str(",Status");
    }
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{},\"{}\",\"{}\",\"{}\"",
            row.serial,
            format_display_date(row.date),
            row.titles,
            row.frequencies
        ));
        if with_status {
            out.push_str(&format!(",\"{}\"", row.statuses.as_deref().unwrap_or("")));
        }
        out.push('\n');
    }
    out
}

/// Renders register rows as an aligned plain-text table. The status column
/// appears only when the rows carry statuses.
pub fn register_txt(rows: &[RegisterRow], month_label: &str) -> String {
    let with_status = rows.iter().any(|row| row.statuses.is_some());
    let width = if with_status { 100 } else { 80 };
    let separator = "=".repeat(width);
    let divider = "-".repeat(width);
    let mut out = format!("MONTH - {month_label}\n\n{separator}\n");
    out.push_str(
        "S. No.  |  Date        |  Title / Description                           |  Frequency",
    );
    if with_status {
        out.push_str("       |  Status");
    }
    out.push('\n');
    out.push_str(&divider);
    out.push('\n');
    for row in rows {
        out.push_str(&format!(
            "{:<6}  |  {:<12}  |  {:<45}  |  ",
            row.serial,
            format_display_date(row.date),
            row.titles
        ));
        if with_status {
            out.push_str(&format!(
                "{:<14}  |  {}",
                row.frequencies,
                row.statuses.as_deref().unwrap_or("")
            ));
        } else {
            out.push_str(&row.frequencies);
        }
        out.push('\n');
    }
    out.push_str(&separator);
    out.push('\n');
    out
}

fn format_display_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}/{}", date.day(), date.month(), date.year())
}
