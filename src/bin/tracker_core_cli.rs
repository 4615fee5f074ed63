use std::{env, path::PathBuf, process};

use chrono::{Local, NaiveDate};
use colored::Colorize;
use uuid::Uuid;

use tracker_core::{
    init,
    report::{asset_schedule, month_register, register_csv, register_txt},
    schedule::{period_summary, DateWindow, Entry, Frequency},
    store::{EntryStore, JsonStore},
};

const DATA_DIR_ENV: &str = "TRACKER_CORE_DATA_DIR";

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("{} {err}", "Error:".red().bold());
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let command = args.next().unwrap_or_else(|| {
        print_usage();
        process::exit(1);
    });

    let store = open_store()?;

    match command.as_str() {
        "add" => {
            let title = required(args.next(), "title")?;
            let start: NaiveDate = required(args.next(), "start date")?.parse()?;
            let frequency: Frequency = required(args.next(), "frequency")?.parse()?;
            let mut entry = Entry::new(title, start, frequency);
            if let Some(amount) = args.next() {
                entry.amount = Some(amount.parse()?);
            }
            let entry = store.create_entry(entry)?;
            println!("{} {} ({})", "Added".green().bold(), entry.title, entry.id);
        }
        "list" => {
            let entries = store.list_entries()?;
            if entries.is_empty() {
                println!("No entries.");
                return Ok(());
            }
            for entry in &entries {
                let state = if entry.is_paused { "paused" } else { "active" };
                println!(
                    "{}  {}  {}  from {}  [{}]",
                    entry.id,
                    entry.title.bold(),
                    entry.frequency.label(),
                    entry.start_date,
                    state
                );
            }
        }
        "pause" => {
            let id: Uuid = required(args.next(), "entry id")?.parse()?;
            let entry = store.toggle_pause(id)?;
            let state = if entry.is_paused { "paused" } else { "resumed" };
            println!("{} {}", state.yellow().bold(), entry.title);
        }
        "remove" => {
            let id: Uuid = required(args.next(), "entry id")?.parse()?;
            store.delete_entry(id)?;
            println!("{} {id}", "Removed".green().bold());
        }
        "month" => {
            let (year, month) = parse_month(&required(args.next(), "month (YYYY-MM)")?)?;
            let entries = store.list_entries()?;
            let window = DateWindow::month(year, month)?;
            let statuses = store.statuses(window)?;
            let rows = month_register(&entries, year, month, Some(&statuses))?;
            print!("{}", register_txt(&rows, &month_label(year, month)));
        }
        "export" => {
            let (year, month) = parse_month(&required(args.next(), "month (YYYY-MM)")?)?;
            let format = required(args.next(), "format (csv|txt)")?;
            let entries = store.list_entries()?;
            let window = DateWindow::month(year, month)?;
            let statuses = store.statuses(window)?;
            let rows = month_register(&entries, year, month, Some(&statuses))?;
            match format.as_str() {
                "csv" => print!("{}", register_csv(&rows)),
                "txt" => print!("{}", register_txt(&rows, &month_label(year, month))),
                other => return Err(format!("unknown export format `{other}`").into()),
            }
        }
        "schedule" => {
            let (year, month) = parse_month(&required(args.next(), "month (YYYY-MM)")?)?;
            let entries = store.list_entries()?;
            let rows = asset_schedule(&entries, DateWindow::month(year, month)?);
            for row in &rows {
                let upcoming = row
                    .upcoming
                    .iter()
                    .map(|date| date.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let last = row
                    .last_done
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".into());
                println!(
                    "{:<3} {:<30} {:<12} last: {:<12} next: {}",
                    row.serial,
                    row.title,
                    row.frequency.code(),
                    last,
                    upcoming
                );
            }
        }
        "summary" => {
            let reference = match args.next() {
                Some(raw) => raw.parse()?,
                None => Local::now().date_naive(),
            };
            let entries = store.list_entries()?;
            let today = Local::now().date_naive();
            print_summary_line(&entries, "This Week", DateWindow::week_of(today));
            print_summary_line(&entries, "Month", DateWindow::trailing_months(reference, 1));
            print_summary_line(&entries, "Quarter", DateWindow::trailing_months(reference, 3));
            print_summary_line(&entries, "Half Year", DateWindow::trailing_months(reference, 6));
        }
        _ => {
            print_usage();
            process::exit(1);
        }
    }

    Ok(())
}

fn print_summary_line(entries: &[Entry], label: &str, window: DateWindow) {
    let summary = period_summary(entries, window);
    println!(
        "{:<10} {} occurrences, total {:.2}",
        label.bold(),
        summary.occurrence_count,
        summary.total_amount
    );
}

fn open_store() -> Result<JsonStore, Box<dyn std::error::Error>> {
    let root = env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    Ok(JsonStore::new(root)?)
}

fn required(value: Option<String>, name: &str) -> Result<String, Box<dyn std::error::Error>> {
    value.ok_or_else(|| format!("missing argument: {name}").into())
}

fn parse_month(raw: &str) -> Result<(i32, u32), Box<dyn std::error::Error>> {
    let (year, month) = raw
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got `{raw}`"))?;
    Ok((year.parse()?, month.parse()?))
}

fn month_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|date| date.format("%B %Y").to_string())
        .unwrap_or_else(|| format!("{year}-{month:02}"))
}

fn print_usage() {
    eprintln!(
        "Usage: tracker_core_cli <command>\n\
         \n\
         Commands:\n\
         \x20 add <title> <YYYY-MM-DD> <frequency> [amount]   create an entry\n\
         \x20 list                                            list entries\n\
         \x20 pause <id>                                      toggle an entry's pause flag\n\
         \x20 remove <id>                                     delete an entry\n\
         \x20 month <YYYY-MM>                                 print the monthly register\n\
         \x20 export <YYYY-MM> <csv|txt>                      write the register to stdout\n\
         \x20 schedule <YYYY-MM>                              print the asset schedule\n\
         \x20 summary [YYYY-MM-DD]                            period rollups\n\
         \n\
         Frequencies: daily, weekly, fortnightly, monthly, quarterly, halfyearly, yearly"
    );
}
