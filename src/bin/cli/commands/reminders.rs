use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Local;

use satchel_lib::reminders::{
    LogSink, NotificationSink, Recurrence, Reminder, ReminderDraft, ReminderScheduler,
};

use crate::app::App;
use crate::commands::assignments::parse_due;
use crate::{OutputFormat, RemindersCommand, RepeatArg};

pub fn run(app: &App, command: RemindersCommand, format: &OutputFormat) -> Result<()> {
    match command {
        RemindersCommand::List { pending } => {
            let mut reminders = lock(app)?.list().context("Failed to list reminders")?;
            if pending {
                reminders.retain(|r| !r.completed);
            }
            print_reminders(&reminders, format)
        }
        RemindersCommand::Add {
            title,
            at,
            body,
            repeat,
        } => {
            let mut draft = ReminderDraft::new(title, parse_due(&at)?);
            draft.body = body;
            draft.recurrence = repeat.into();

            let admitted = lock(app)?.admit(&draft)?;
            println!(
                "Added reminder '{}' at {}",
                admitted.title,
                admitted.date.with_timezone(&Local).format("%Y-%m-%d %H:%M")
            );
            Ok(())
        }
        RemindersCommand::Edit {
            title,
            new_title,
            at,
            body,
            repeat,
        } => {
            let existing = app.find_reminder(&title)?;
            let mut draft = ReminderDraft::edit_of(&existing);

            if let Some(new_title) = new_title {
                draft.title = new_title;
            }
            if let Some(at) = at {
                draft.date = parse_due(&at)?;
            }
            if let Some(body) = body {
                draft.body = Some(body);
            }
            if let Some(repeat) = repeat {
                draft.recurrence = repeat.into();
            }

            let admitted = lock(app)?.admit(&draft)?;
            println!("Updated reminder '{}'", admitted.title);
            Ok(())
        }
        RemindersCommand::Done { title, undo } => {
            let reminder = app.find_reminder(&title)?;
            let updated = lock(app)?.set_completed(reminder.id, !undo)?;
            if updated.completed {
                println!("Marked '{}' completed", updated.title);
            } else {
                println!("Marked '{}' pending", updated.title);
            }
            Ok(())
        }
        RemindersCommand::Remove { title } => {
            let reminder = app.find_reminder(&title)?;
            lock(app)?.remove(reminder.id)?;
            println!("Deleted reminder '{}'", reminder.title);
            Ok(())
        }
        RemindersCommand::Fire { title } => {
            let reminder = app.find_reminder(&title)?;
            LogSink.deliver(&reminder);
            println!("Delivered '{}'", reminder.title);
            Ok(())
        }
        RemindersCommand::Watch => watch(app),
    }
}

/// Run the scheduler in the foreground until Ctrl-C
fn watch(app: &App) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let mut scheduler =
            ReminderScheduler::new(Arc::clone(&app.reminders), Arc::new(LogSink));
        scheduler.start();

        println!("Watching reminders. Press Ctrl-C to stop.");
        tokio::signal::ctrl_c()
            .await
            .context("Failed to listen for Ctrl-C")?;

        scheduler.shutdown();
        Ok(())
    })
}

impl From<RepeatArg> for Recurrence {
    fn from(arg: RepeatArg) -> Self {
        match arg {
            RepeatArg::None => Recurrence::None,
            RepeatArg::Daily => Recurrence::Daily,
            RepeatArg::Weekly => Recurrence::Weekly,
            RepeatArg::Monthly => Recurrence::Monthly,
        }
    }
}

fn lock(app: &App) -> Result<std::sync::MutexGuard<'_, satchel_lib::reminders::ReminderStorage>> {
    app.reminders
        .lock()
        .map_err(|_| anyhow!("Reminder storage lock poisoned"))
}

fn print_reminders(reminders: &[Reminder], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(reminders)?);
        }
        OutputFormat::Plain => {
            if reminders.is_empty() {
                println!("No reminders found.");
                return Ok(());
            }

            for r in reminders {
                let mark = if r.completed { "x" } else { " " };
                let repeat = match r.recurrence {
                    Recurrence::None => String::new(),
                    other => format!("  repeats {:?}", other).to_lowercase(),
                };
                println!(
                    "[{}] {:<28} {}{}",
                    mark,
                    r.title,
                    r.date.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    repeat
                );
                if let Some(body) = &r.body {
                    println!("      {}", body);
                }
            }
        }
    }
    Ok(())
}
