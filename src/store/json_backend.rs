use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::TrackerError;
use crate::schedule::{CompletionStatus, DateWindow, Entry, StatusLookup, StatusRecord};

use super::{EntryStore, Result};

const APP_DIR: &str = "tracker_core";
const ENTRIES_FILE: &str = "entries.json";
const STATUSES_FILE: &str = "statuses.json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file entry store. Each operation re-reads the files, so separate
/// instances over the same directory observe one another's writes.
#[derive(Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_root);
        ensure_dir(&root)?;
        Ok(Self { root })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entries_path(&self) -> PathBuf {
        self.root.join(ENTRIES_FILE)
    }

    fn statuses_path(&self) -> PathBuf {
        self.root.join(STATUSES_FILE)
    }

    fn read_entries(&self) -> Result<Vec<Entry>> {
        read_json(&self.entries_path())
    }

    fn write_entries(&self, entries: &[Entry]) -> Result<()> {
        write_json(&self.entries_path(), entries)
    }

    fn read_statuses(&self) -> Result<Vec<StatusRecord>> {
        read_json(&self.statuses_path())
    }

    fn write_statuses(&self, records: &[StatusRecord]) -> Result<()> {
        write_json(&self.statuses_path(), records)
    }
}

impl EntryStore for JsonStore {
    fn list_entries(&self) -> Result<Vec<Entry>> {
        self.read_entries()
    }

    fn create_entry(&self, mut entry: Entry) -> Result<Entry> {
        entry.validate()?;
        let now = Utc::now();
        entry.created_at = now;
        entry.updated_at = now;
        let mut entries = self.read_entries()?;
        entries.push(entry.clone());
        self.write_entries(&entries)?;
        tracing::info!(entry_id = %entry.id, title = %entry.title, "created entry");
        Ok(entry)
    }

    fn update_entry(&self, mut entry: Entry) -> Result<Entry> {
        entry.validate()?;
        entry.updated_at = Utc::now();
        let mut entries = self.read_entries()?;
        let slot = entries
            .iter_mut()
            .find(|existing| existing.id == entry.id)
            .ok_or_else(|| TrackerError::InvalidRef(format!("entry {} not found", entry.id)))?;
        entry.created_at = slot.created_at;
        *slot = entry.clone();
        self.write_entries(&entries)?;
        tracing::debug!(entry_id = %entry.id, "updated entry");
        Ok(entry)
    }

    fn delete_entry(&self, id: Uuid) -> Result<()> {
        let mut entries = self.read_entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        if entries.len() == before {
            return Err(TrackerError::InvalidRef(format!("entry {id} not found")));
        }
        self.write_entries(&entries)?;
        let mut statuses = self.read_statuses()?;
        statuses.retain(|record| record.entry_id != id);
        self.write_statuses(&statuses)?;
        tracing::info!(entry_id = %id, "deleted entry");
        Ok(())
    }

    fn toggle_pause(&self, id: Uuid) -> Result<Entry> {
        let mut entries = self.read_entries()?;
        let entry = entries
            .iter_mut()
            .find(|entry| entry.id == id)
            .ok_or_else(|| TrackerError::InvalidRef(format!("entry {id} not found")))?;
        entry.is_paused = !entry.is_paused;
        entry.updated_at = Utc::now();
        let updated = entry.clone();
        self.write_entries(&entries)?;
        tracing::debug!(entry_id = %id, paused = updated.is_paused, "toggled pause");
        Ok(updated)
    }

    fn statuses(&self, window: DateWindow) -> Result<StatusLookup> {
        let records = self.read_statuses()?;
        Ok(records
            .into_iter()
            .filter(|record| window.contains(record.date))
            .collect())
    }

    fn set_status(
        &self,
        entry_id: Uuid,
        date: NaiveDate,
        status: CompletionStatus,
        remarks: Option<String>,
    ) -> Result<()> {
        let mut records = self.read_statuses()?;
        let now = Utc::now();
        match records
            .iter_mut()
            .find(|record| record.entry_id == entry_id && record.date == date)
        {
            Some(record) => {
                record.status = status;
                record.remarks = remarks;
                record.updated_at = now;
            }
            None => records.push(StatusRecord {
                entry_id,
                date,
                status,
                remarks,
                updated_at: now,
            }),
        }
        self.write_statuses(&records)?;
        tracing::debug!(entry_id = %entry_id, %date, ?status, "set status");
        Ok(())
    }
}

fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &[T]) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(TMP_SUFFIX)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
