use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TrackerError;

use super::Frequency;

/// A user-defined recurring rule. The engine treats entries as immutable
/// inputs; lifecycle (create/update/pause) belongs to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub start_date: NaiveDate,
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_paused: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    pub fn new(title: impl Into<String>, start_date: NaiveDate, frequency: Frequency) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            amount: None,
            start_date,
            frequency,
            end_date: None,
            is_paused: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Creation-boundary invariants: non-empty title and start <= end.
    /// The recurrence engine does not re-check these.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.title.trim().is_empty() {
            return Err(TrackerError::Validation("entry title is required".into()));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(TrackerError::Validation(
                    "entry end date precedes its start date".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Per-occurrence completion state, keyed externally by entry and date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompletionStatus {
    Completed,
    #[default]
    Incomplete,
}

impl CompletionStatus {
    /// Label used in the exported register.
    pub fn register_label(&self) -> &'static str {
        match self {
            CompletionStatus::Completed => "Completed",
            CompletionStatus::Incomplete => "In-Completed",
        }
    }
}

/// Persisted completion row owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusRecord {
    pub entry_id: Uuid,
    pub date: NaiveDate,
    pub status: CompletionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Completion lookup handed to report builders. Keys follow the
/// `"{entry_id}-{YYYY-MM-DD}"` convention; absent keys read as incomplete.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusLookup {
    statuses: HashMap<String, CompletionStatus>,
}

impl StatusLookup {
    pub fn key(entry_id: Uuid, date: NaiveDate) -> String {
        format!("{}-{}", entry_id, date.format("%Y-%m-%d"))
    }

    pub fn set(&mut self, entry_id: Uuid, date: NaiveDate, status: CompletionStatus) {
        self.statuses.insert(Self::key(entry_id, date), status);
    }

    pub fn status_for(&self, entry_id: Uuid, date: NaiveDate) -> CompletionStatus {
        self.statuses
            .get(&Self::key(entry_id, date))
            .copied()
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl FromIterator<StatusRecord> for StatusLookup {
    fn from_iter<I: IntoIterator<Item = StatusRecord>>(records: I) -> Self {
        let mut lookup = StatusLookup::default();
        for record in records {
            lookup.set(record.entry_id, record.date, record.status);
        }
        lookup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_blank_title_and_inverted_bounds() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let blank = Entry::new("  ", start, Frequency::Daily);
        assert!(blank.validate().is_err());

        let inverted = Entry::new("Service pump", start, Frequency::Weekly)
            .with_end_date(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert!(inverted.validate().is_err());

        let ok = Entry::new("Service pump", start, Frequency::Weekly).with_end_date(start);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn status_lookup_defaults_to_incomplete() {
        let entry_id = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut lookup = StatusLookup::default();
        assert_eq!(
            lookup.status_for(entry_id, date),
            CompletionStatus::Incomplete
        );
        lookup.set(entry_id, date, CompletionStatus::Completed);
        assert_eq!(
            lookup.status_for(entry_id, date),
            CompletionStatus::Completed
        );
        assert_eq!(
            lookup.status_for(Uuid::new_v4(), date),
            CompletionStatus::Incomplete
        );
    }

    #[test]
    fn status_key_matches_external_convention() {
        let entry_id = Uuid::nil();
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(
            StatusLookup::key(entry_id, date),
            "00000000-0000-0000-0000-000000000000-2024-03-05"
        );
    }
}
