//! Recurrence domain models, the occurrence engine, and period helpers.

pub mod entry;
pub mod frequency;
pub mod recurrence;
pub mod window;

pub use entry::{CompletionStatus, Entry, StatusLookup, StatusRecord};
pub use frequency::Frequency;
pub use recurrence::{
    date_occurrences, generate_occurrences, month_occurrences, occurrences_by_date,
    period_summary, Occurrence, PeriodSummary,
};
pub use window::DateWindow;
