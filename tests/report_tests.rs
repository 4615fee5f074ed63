use chrono::NaiveDate;
use tracker_core::report::{
    asset_schedule, month_register, register_csv, register_txt,
};
use tracker_core::schedule::{
    CompletionStatus, DateWindow, Entry, Frequency, StatusLookup,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn fixture_entries() -> Vec<Entry> {
    vec![
        Entry::new("Inspect hoist", date(2024, 3, 1), Frequency::Weekly),
        Entry::new("Grease bearings", date(2024, 3, 1), Frequency::Monthly),
    ]
}

#[test]
fn register_has_one_row_per_calendar_day() {
    let rows = month_register(&fixture_entries(), 2024, 3, None).unwrap();
    assert_eq!(rows.len(), 31);
    assert_eq!(rows[0].serial, 1);
    assert_eq!(rows[0].date, date(2024, 3, 1));
    assert_eq!(rows[30].serial, 31);
    assert_eq!(rows[30].date, date(2024, 3, 31));
}

#[test]
fn register_joins_titles_and_frequency_codes() {
    let rows = month_register(&fixture_entries(), 2024, 3, None).unwrap();
    assert_eq!(rows[0].titles, "Inspect hoist, Grease bearings");
    assert_eq!(rows[0].frequencies, "WEEKLY, MONTHLY");
    // March 2 has nothing due.
    assert_eq!(rows[1].titles, "");
    assert_eq!(rows[1].frequencies, "");
    assert!(rows[1].statuses.is_none());
}

#[test]
fn register_joins_completion_labels_when_lookup_supplied() {
    let entries = fixture_entries();
    let mut lookup = StatusLookup::default();
    lookup.set(entries[0].id, date(2024, 3, 1), CompletionStatus::Completed);

    let rows = month_register(&entries, 2024, 3, Some(&lookup)).unwrap();
    assert_eq!(rows[0].statuses.as_deref(), Some("Completed, In-Completed"));
    // Empty day still carries the column, just blank.
    assert_eq!(rows[1].statuses.as_deref(), Some(""));
}

#[test]
fn register_builders_are_deterministic() {
    let entries = fixture_entries();
    let first = month_register(&entries, 2024, 3, None).unwrap();
    let second = month_register(&entries, 2024, 3, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(register_csv(&first), register_csv(&second));
    assert_eq!(
        register_txt(&first, "March 2024"),
        register_txt(&second, "March 2024")
    );
}

#[test]
fn csv_uses_export_column_order_and_display_dates() {
    let rows = month_register(&fixture_entries(), 2024, 3, None).unwrap();
    let csv = register_csv(&rows);
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("S. No.,Date,Title / Description,Frequency"));
    assert_eq!(
        lines.next(),
        Some("1,\"01/03/2024\",\"Inspect hoist, Grease bearings\",\"WEEKLY, MONTHLY\"")
    );
    assert_eq!(csv.lines().count(), 32);
}

#[test]
fn txt_render_carries_month_banner_and_rulers() {
    let rows = month_register(&fixture_entries(), 2024, 3, None).unwrap();
    let txt = register_txt(&rows, "March 2024");
    assert!(txt.starts_with("MONTH - March 2024\n"));
    assert!(txt.contains(&"=".repeat(80)));
    assert!(txt.contains("Title / Description"));
    assert!(txt.contains("Inspect hoist, Grease bearings"));
}

#[test]
fn schedule_slot_counts_depend_on_frequency() {
    let window = DateWindow::month(2024, 3).unwrap();
    let rows = asset_schedule(&fixture_entries(), window);
    assert_eq!(rows.len(), 2);

    // Weekly from March 1: five in-month occurrences fill all five slots.
    assert_eq!(rows[0].frequency, Frequency::Weekly);
    assert_eq!(
        rows[0].upcoming,
        vec![
            date(2024, 3, 1),
            date(2024, 3, 8),
            date(2024, 3, 15),
            date(2024, 3, 22),
            date(2024, 3, 29),
        ]
    );
    assert_eq!(rows[1].frequency, Frequency::Monthly);
    assert_eq!(rows[1].upcoming, vec![date(2024, 3, 1)]);
}

#[test]
fn schedule_reports_last_occurrence_before_period() {
    let entries = vec![
        Entry::new("Replace filters", date(2024, 1, 15), Frequency::Monthly),
        Entry::new("Fire drill", date(2024, 3, 5), Frequency::Quarterly),
    ];
    let rows = asset_schedule(&entries, DateWindow::month(2024, 3).unwrap());
    assert_eq!(rows[0].last_done, Some(date(2024, 2, 15)));
    // Series starts inside the period, so there is no prior occurrence.
    assert_eq!(rows[1].last_done, None);
    assert_eq!(rows[1].upcoming, vec![date(2024, 3, 5)]);
}

#[test]
fn schedule_finds_last_occurrence_across_long_lived_series() {
    // A daily entry several years old has thousands of occurrences before
    // the period; the lookback must still land on the day before it.
    let entries = vec![
        Entry::new("Meter reading", date(2020, 1, 1), Frequency::Daily),
        Entry::new("Sprinkler test", date(2019, 6, 3), Frequency::Weekly),
    ];
    let rows = asset_schedule(&entries, DateWindow::month(2024, 3).unwrap());
    assert_eq!(rows[0].last_done, Some(date(2024, 2, 29)));
    // 2019-06-03 was a Monday, so the weekly cadence lands on Mondays.
    assert_eq!(rows[1].last_done, Some(date(2024, 2, 26)));
}

#[test]
fn txt_render_includes_status_column_when_rows_carry_it() {
    let entries = fixture_entries();
    let mut lookup = StatusLookup::default();
    lookup.set(entries[0].id, date(2024, 3, 1), CompletionStatus::Completed);

    let rows = month_register(&entries, 2024, 3, Some(&lookup)).unwrap();
    let txt = register_txt(&rows, "March 2024");
    assert!(txt.contains("|  Status"));
    assert!(txt.contains("Completed, In-Completed"));

    let plain = register_txt(&month_register(&entries, 2024, 3, None).unwrap(), "March 2024");
    assert!(!plain.contains("Status"));
}

#[test]
fn schedule_omits_paused_entries() {
    let mut entries = fixture_entries();
    entries[0].is_paused = true;
    let rows = asset_schedule(&entries, DateWindow::month(2024, 3).unwrap());
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Grease bearings");
    assert_eq!(rows[0].serial, 1);
}

#[test]
fn daily_schedule_row_is_capped_at_slot_capacity() {
    let entries = vec![Entry::new("Walkthrough", date(2024, 2, 1), Frequency::Daily)];
    let rows = asset_schedule(&entries, DateWindow::month(2024, 2).unwrap());
    assert_eq!(rows[0].upcoming.len(), 29);

    let rows = asset_schedule(&entries, DateWindow::month(2024, 3).unwrap());
    assert_eq!(rows[0].upcoming.len(), 31);
}
