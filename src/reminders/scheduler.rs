//! Reminder scheduler
//!
//! Sleeps until the earliest pending reminder, hands it to a notification
//! sink, then advances recurring reminders and completes one-shot ones.
//! Runs in-app only: reminders fire while the planner is running.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

use super::models::Reminder;
use super::storage::ReminderStorage;
use crate::storage::Result;

/// Delivery seam for platform notifications
///
/// The planner never talks to a notification service itself; whatever hosts
/// it decides what "deliver" means. The default sink just logs.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, reminder: &Reminder);
}

/// Sink that writes reminders to the log
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, reminder: &Reminder) {
        match &reminder.body {
            Some(body) => log::info!("Reminder: {} ({})", reminder.title, body),
            None => log::info!("Reminder: {}", reminder.title),
        }
    }
}

/// Message types for scheduler communication
#[derive(Debug)]
pub enum SchedulerMessage {
    /// Reload pending reminders from storage
    Reload,
    /// Deliver a specific reminder now, regardless of its date
    DeliverNow(Uuid),
    /// Shutdown the scheduler
    Shutdown,
}

/// Reminder scheduler handle
pub struct ReminderScheduler {
    storage: Arc<Mutex<ReminderStorage>>,
    sink: Arc<dyn NotificationSink>,
    sender: Option<mpsc::Sender<SchedulerMessage>>,
}

impl ReminderScheduler {
    pub fn new(storage: Arc<Mutex<ReminderStorage>>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            storage,
            sink,
            sender: None,
        }
    }

    /// Start the scheduler in a background task
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        let (tx, rx) = mpsc::channel(32);
        self.sender = Some(tx.clone());

        let storage = Arc::clone(&self.storage);
        let sink = Arc::clone(&self.sink);

        tokio::spawn(async move {
            scheduler_loop(storage, sink, rx).await;
        });

        let _ = tx.try_send(SchedulerMessage::Reload);
    }

    /// Request the scheduler to re-read reminders after a mutation
    pub fn reload(&self) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(SchedulerMessage::Reload);
        }
    }

    /// Request immediate delivery of one reminder
    pub fn deliver_now(&self, reminder_id: Uuid) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(SchedulerMessage::DeliverNow(reminder_id));
        }
    }

    /// Shutdown the scheduler
    pub fn shutdown(&self) {
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(SchedulerMessage::Shutdown);
        }
    }
}

/// Main scheduler loop
pub async fn scheduler_loop(
    storage: Arc<Mutex<ReminderStorage>>,
    sink: Arc<dyn NotificationSink>,
    mut receiver: mpsc::Receiver<SchedulerMessage>,
) {
    let mut next_check: Option<DateTime<Utc>> = None;

    loop {
        let wait_duration = if let Some(next) = next_check {
            let now = Utc::now();
            if next <= now {
                Duration::from_secs(0)
            } else {
                (next - now).to_std().unwrap_or(Duration::from_secs(60))
            }
        } else {
            Duration::from_secs(60) // Default check interval
        };

        tokio::select! {
            _ = tokio::time::sleep(wait_duration) => {
                if let Ok(storage) = storage.lock() {
                    match deliver_due(&storage, sink.as_ref(), Utc::now()) {
                        Ok(delivered) if delivered > 0 => {
                            log::info!("Scheduler: delivered {} reminder(s)", delivered);
                        }
                        Ok(_) => {}
                        Err(e) => log::error!("Scheduler: delivery pass failed: {}", e),
                    }
                    next_check = next_pending(&storage);
                }
            }

            msg = receiver.recv() => {
                match msg {
                    Some(SchedulerMessage::Reload) => {
                        if let Ok(storage) = storage.lock() {
                            next_check = next_pending(&storage);
                        }
                        log::info!(
                            "Scheduler: reloaded, next reminder at {:?}",
                            next_check
                        );
                    }
                    Some(SchedulerMessage::DeliverNow(reminder_id)) => {
                        if let Ok(storage) = storage.lock() {
                            match storage.get(reminder_id) {
                                Ok(reminder) => sink.deliver(&reminder),
                                Err(e) => log::error!(
                                    "Scheduler: cannot deliver {}: {}",
                                    reminder_id, e
                                ),
                            }
                        }
                    }
                    Some(SchedulerMessage::Shutdown) | None => {
                        log::info!("Scheduler: shutting down");
                        break;
                    }
                }
            }
        }
    }
}

/// Deliver every reminder due at `now` and update its schedule
///
/// Recurring reminders advance to their next occurrence after `now`;
/// one-shot reminders are marked completed so they never fire again.
/// Returns the number of reminders delivered.
pub fn deliver_due(
    storage: &ReminderStorage,
    sink: &dyn NotificationSink,
    now: DateTime<Utc>,
) -> Result<usize> {
    let due = storage.due_before(now)?;
    let delivered = due.len();

    for reminder in due {
        sink.deliver(&reminder);

        let mut next = reminder.recurrence.next_occurrence(reminder.date);
        // Catch up a reminder that was due several periods ago
        while let Some(n) = next {
            if n > now {
                break;
            }
            next = reminder.recurrence.next_occurrence(n);
        }

        match next {
            Some(next_date) => {
                storage.reschedule(reminder.id, next_date)?;
            }
            None => {
                storage.set_completed(reminder.id, true)?;
            }
        }
    }

    Ok(delivered)
}

/// Earliest pending reminder date, if any
fn next_pending(storage: &ReminderStorage) -> Option<DateTime<Utc>> {
    let reminders = storage.list().ok()?;
    reminders
        .iter()
        .filter(|r| !r.completed)
        .map(|r| r.date)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::models::{Recurrence, ReminderDraft};
    use chrono::TimeZone;
    use tempfile::TempDir;

    /// Sink that records delivered titles for assertions
    struct RecordingSink {
        delivered: Mutex<Vec<String>>,
    }

    impl RecordingSink {
        fn new() -> Self {
            Self {
                delivered: Mutex::new(Vec::new()),
            }
        }

        fn titles(&self) -> Vec<String> {
            self.delivered.lock().unwrap().clone()
        }
    }

    impl NotificationSink for RecordingSink {
        fn deliver(&self, reminder: &Reminder) {
            self.delivered.lock().unwrap().push(reminder.title.clone());
        }
    }

    fn create_test_storage() -> (ReminderStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = ReminderStorage::new(temp_dir.path().to_path_buf()).unwrap();
        (storage, temp_dir)
    }

    fn at(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 9, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_one_shot_reminder_completes_after_delivery() {
        let (storage, _temp) = create_test_storage();
        let sink = RecordingSink::new();

        let reminder = storage
            .admit(&ReminderDraft::new("Hand in essay", at(5, 9)))
            .unwrap();

        let delivered = deliver_due(&storage, &sink, at(5, 10)).unwrap();
        assert_eq!(delivered, 1);
        assert_eq!(sink.titles(), ["Hand in essay"]);
        assert!(storage.get(reminder.id).unwrap().completed);

        // A second pass delivers nothing
        assert_eq!(deliver_due(&storage, &sink, at(5, 11)).unwrap(), 0);
    }

    #[test]
    fn test_recurring_reminder_advances_instead_of_completing() {
        let (storage, _temp) = create_test_storage();
        let sink = RecordingSink::new();

        let mut draft = ReminderDraft::new("Weekly review", at(5, 9));
        draft.recurrence = Recurrence::Weekly;
        let reminder = storage.admit(&draft).unwrap();

        deliver_due(&storage, &sink, at(5, 10)).unwrap();

        let stored = storage.get(reminder.id).unwrap();
        assert!(!stored.completed);
        assert_eq!(stored.date, at(12, 9));
    }

    #[test]
    fn test_overdue_recurring_reminder_catches_up() {
        let (storage, _temp) = create_test_storage();
        let sink = RecordingSink::new();

        let mut draft = ReminderDraft::new("Daily standup", at(1, 9));
        draft.recurrence = Recurrence::Daily;
        let reminder = storage.admit(&draft).unwrap();

        // Ten days later: delivered once, rescheduled past now
        deliver_due(&storage, &sink, at(11, 12)).unwrap();

        let stored = storage.get(reminder.id).unwrap();
        assert_eq!(stored.date, at(12, 9));
        assert_eq!(sink.titles().len(), 1);
    }

    #[test]
    fn test_future_reminders_left_alone() {
        let (storage, _temp) = create_test_storage();
        let sink = RecordingSink::new();

        storage
            .admit(&ReminderDraft::new("Not yet", at(20, 9)))
            .unwrap();

        assert_eq!(deliver_due(&storage, &sink, at(5, 9)).unwrap(), 0);
        assert!(sink.titles().is_empty());
    }

    #[test]
    fn test_next_pending_ignores_completed() {
        let (storage, _temp) = create_test_storage();

        let done = storage.admit(&ReminderDraft::new("Done", at(2, 9))).unwrap();
        storage.set_completed(done.id, true).unwrap();
        storage.admit(&ReminderDraft::new("Pending", at(8, 9))).unwrap();

        assert_eq!(next_pending(&storage), Some(at(8, 9)));
    }
}
