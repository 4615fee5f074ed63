//! Entry and status persistence. The recurrence engine never touches a
//! store; callers fetch entries here and pass them in explicitly.

pub mod json_backend;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::schedule::{CompletionStatus, DateWindow, Entry, StatusLookup};

pub use json_backend::JsonStore;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Owns the entry lifecycle and completion rows.
pub trait EntryStore {
    /// All entries in stored order.
    fn list_entries(&self) -> Result<Vec<Entry>>;

    /// Validates and persists a new entry, returning it with bookkeeping
    /// fields populated.
    fn create_entry(&self, entry: Entry) -> Result<Entry>;

    /// Replaces an existing entry by id, bumping `updated_at`.
    fn update_entry(&self, entry: Entry) -> Result<Entry>;

    fn delete_entry(&self, id: Uuid) -> Result<()>;

    /// Flips the pause flag and returns the updated entry.
    fn toggle_pause(&self, id: Uuid) -> Result<Entry>;

    /// Completion lookup for every status row dated within the window.
    fn statuses(&self, window: DateWindow) -> Result<StatusLookup>;

    /// Upserts the completion state for one occurrence.
    fn set_status(
        &self,
        entry_id: Uuid,
        date: NaiveDate,
        status: CompletionStatus,
        remarks: Option<String>,
    ) -> Result<()>;
}
