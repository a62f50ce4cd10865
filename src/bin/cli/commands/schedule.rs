use anyhow::{Context, Result};

use satchel_lib::schedule::{EntryDraft, ScheduleEntry};

use crate::app::App;
use crate::{OutputFormat, ScheduleCommand};

pub fn run(app: &App, command: ScheduleCommand, format: &OutputFormat) -> Result<()> {
    match command {
        ScheduleCommand::List => {
            let entries = app.schedule.list().context("Failed to list schedule")?;
            print_entries(&entries, format)
        }
        ScheduleCommand::Add {
            name,
            start_time,
            end_time,
            start_date,
            end_date,
            days,
            location,
        } => {
            let draft = EntryDraft {
                id: None,
                name,
                start_time,
                end_time,
                start_date,
                end_date,
                days,
                location,
            };
            let admitted = app.schedule.admit(&draft)?;
            println!(
                "Added '{}' ({} {}-{})",
                admitted.name,
                admitted.days.join("/"),
                admitted.start_time,
                admitted.end_time
            );
            Ok(())
        }
        ScheduleCommand::Edit {
            name,
            new_name,
            start_time,
            end_time,
            start_date,
            end_date,
            days,
            location,
        } => {
            let existing = app.find_entry(&name)?;
            let mut draft = EntryDraft::edit_of(&existing);

            if let Some(new_name) = new_name {
                draft.name = new_name;
            }
            if let Some(start_time) = start_time {
                draft.start_time = start_time;
            }
            if let Some(end_time) = end_time {
                draft.end_time = end_time;
            }
            if let Some(start_date) = start_date {
                draft.start_date = start_date;
            }
            if let Some(end_date) = end_date {
                draft.end_date = end_date;
            }
            if let Some(days) = days {
                draft.days = days;
            }
            if let Some(location) = location {
                draft.location = location;
            }

            let admitted = app.schedule.admit(&draft)?;
            println!("Updated '{}'", admitted.name);
            Ok(())
        }
        ScheduleCommand::Remove { name } => {
            let entry = app.find_entry(&name)?;
            app.schedule.remove(entry.id)?;
            println!("Deleted '{}'", entry.name);
            Ok(())
        }
        ScheduleCommand::Search { query } => {
            let entries = app.schedule.search(&query)?;
            print_entries(&entries, format)
        }
    }
}

fn print_entries(entries: &[ScheduleEntry], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No schedule entries found.");
                return Ok(());
            }

            for entry in entries {
                println!(
                    "{:<24} {}-{}  {:<32} {}  ({} to {})",
                    entry.name,
                    entry.start_time,
                    entry.end_time,
                    entry.days.join(", "),
                    entry.location,
                    entry.start_date,
                    entry.end_date
                );
            }
        }
    }
    Ok(())
}
