#![doc(test(attr(deny(warnings))))]

//! Tracker Core offers recurrence, calendar aggregation, and report-building
//! primitives that power recurring-task tracking workflows and CLIs.

pub mod errors;
pub mod report;
pub mod schedule;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Tracker Core tracing initialized.");
    });
}
