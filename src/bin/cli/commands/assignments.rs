use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

use satchel_lib::assignments::{Assignment, AssignmentDraft, Priority};

use crate::app::App;
use crate::{AssignmentsCommand, OutputFormat, PriorityArg};

pub fn run(app: &App, command: AssignmentsCommand, format: &OutputFormat) -> Result<()> {
    match command {
        AssignmentsCommand::List { pending } => {
            let mut assignments = app.assignments.list().context("Failed to list assignments")?;
            if pending {
                assignments.retain(|a| !a.completed);
            }
            print_assignments(&assignments, format)
        }
        AssignmentsCommand::Add {
            title,
            course,
            due,
            description,
            priority,
        } => {
            let mut draft = AssignmentDraft::new(title, course, parse_due(&due)?);
            draft.description = description;
            draft.priority = priority.into();

            let admitted = app.assignments.admit(&draft)?;
            println!(
                "Added '{}' for {}, due {}",
                admitted.title,
                admitted.course,
                format_due(admitted.due_date)
            );
            Ok(())
        }
        AssignmentsCommand::Edit {
            title,
            new_title,
            course,
            due,
            description,
            priority,
        } => {
            let existing = app.find_assignment(&title)?;
            let mut draft = AssignmentDraft::edit_of(&existing);

            if let Some(new_title) = new_title {
                draft.title = new_title;
            }
            if let Some(course) = course {
                draft.course = course;
            }
            if let Some(due) = due {
                draft.due_date = parse_due(&due)?;
            }
            if let Some(description) = description {
                draft.description = Some(description);
            }
            if let Some(priority) = priority {
                draft.priority = priority.into();
            }

            let admitted = app.assignments.admit(&draft)?;
            println!("Updated '{}'", admitted.title);
            Ok(())
        }
        AssignmentsCommand::Done { title, undo } => {
            let assignment = app.find_assignment(&title)?;
            let updated = app.assignments.set_completed(assignment.id, !undo)?;
            if updated.completed {
                println!("Marked '{}' done", updated.title);
            } else {
                println!("Marked '{}' pending", updated.title);
            }
            Ok(())
        }
        AssignmentsCommand::Remove { title } => {
            let assignment = app.find_assignment(&title)?;
            app.assignments.remove(assignment.id)?;
            println!("Deleted '{}'", assignment.title);
            Ok(())
        }
        AssignmentsCommand::Search { query } => {
            let assignments = app.assignments.search(&query)?;
            print_assignments(&assignments, format)
        }
    }
}

impl From<PriorityArg> for Priority {
    fn from(arg: PriorityArg) -> Self {
        match arg {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

/// Parse "YYYY-MM-DD HH:MM" or bare "YYYY-MM-DD" (due end of that day),
/// interpreted in local time
pub fn parse_due(raw: &str) -> Result<DateTime<Utc>> {
    let raw = raw.trim();

    let naive = if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M") {
        dt
    } else {
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}': expected YYYY-MM-DD or YYYY-MM-DD HH:MM", raw))?;
        date.and_hms_opt(23, 59, 0)
            .context("Invalid time of day")?
    };

    Local
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("Ambiguous local time '{}'", raw))
}

fn format_due(due: DateTime<Utc>) -> String {
    due.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn print_assignments(assignments: &[Assignment], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(assignments)?);
        }
        OutputFormat::Plain => {
            if assignments.is_empty() {
                println!("No assignments found.");
                return Ok(());
            }

            for a in assignments {
                let mark = if a.completed { "x" } else { " " };
                println!(
                    "[{}] {:<28} {:<16} due {}  ({:?})",
                    mark,
                    a.title,
                    a.course,
                    format_due(a.due_date),
                    a.priority
                );
                if let Some(description) = &a.description {
                    println!("      {}", description);
                }
            }
        }
    }
    Ok(())
}
