//! Text and table output formatting for entries.

use std::io::IsTerminal;

use chrono::{DateTime, Local, Utc};
use comfy_table::{presets, Cell, ContentArrangement, Table};
use journal_core::Entry;

const DATE_FORMAT: &str = "%a %d %b %Y";
const TIME_FORMAT_12H: &str = "%I:%M %p";
const TIME_FORMAT_24H: &str = "%H:%M";

/// Calendar date in local time, e.g. `Sun 01 Jul 2018`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.with_timezone(&Local).format(DATE_FORMAT).to_string()
}

/// Time of day in local time, `08:30 AM` or `08:30` on a 24-hour clock.
pub fn format_time(date: &DateTime<Utc>, military: bool) -> String {
    let format = if military {
        TIME_FORMAT_24H
    } else {
        TIME_FORMAT_12H
    };
    date.with_timezone(&Local).format(format).to_string()
}

/// Date and time together, separated by two spaces.
pub fn format_date_time(date: &DateTime<Utc>, military: bool) -> String {
    format!("{}  {}", format_date(date), format_time(date, military))
}

fn display_title(entry: &Entry) -> &str {
    if entry.title.is_empty() {
        "(untitled)"
    } else {
        &entry.title
    }
}

/// Print entries as a table on a terminal, one tab-separated line each otherwise.
pub fn print_entry_list(entries: &[Entry], military: bool, quiet: bool) {
    if entries.is_empty() {
        if !quiet {
            println!("No entries found.");
        }
        return;
    }

    if quiet {
        for entry in entries {
            println!("{}", entry.id);
        }
        return;
    }

    if !std::io::stdout().is_terminal() {
        for entry in entries {
            println!(
                "{}\t{}\t{}",
                entry.id,
                format_date_time(&entry.date, military),
                entry.title
            );
        }
        return;
    }

    let mut table = Table::new();
    table.load_preset(presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "DATE", "TITLE"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.id),
            Cell::new(format_date_time(&entry.date, military)),
            Cell::new(display_title(entry)),
        ]);
    }
    println!("{}", table);
}

/// Print a single entry in human-readable format.
pub fn print_entry(entry: &Entry, military: bool, quiet: bool) {
    if !quiet {
        println!("ID: {}", entry.id);
        println!("Title: {}", display_title(entry));
        println!("Date: {}", format_date(&entry.date));
        println!("Time: {}", format_time(&entry.date, military));
        println!();
    }
    println!("{}", entry.content);
}
