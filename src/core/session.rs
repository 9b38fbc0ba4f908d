use crate::core::calculator::earnings::effective_rate;
use crate::core::prefs::{validate_default_rate, validate_reminder_hours};
use crate::core::reminder::{ReminderScheduler, hours_to_millis};
use crate::db::log::ttlog;
use crate::db::queries::{complete_session, insert_entry, load_active_session};
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::entry::TimeEntry;
use crate::ui::messages::warning;
use chrono::{Duration, NaiveDateTime};

/// Clock-in / clock-out, with the guarantee that at most one entry is open.
pub struct SessionLogic;

impl SessionLogic {
    pub fn active_session(store: &EntryStore) -> AppResult<Option<TimeEntry>> {
        store.active_session()
    }

    /// Open a new session at `now`. Fails with `SessionAlreadyActive` when
    /// one is already open. A reminder is scheduled `reminder_hours` later;
    /// failing to schedule it does not undo the clock-in. An out-of-range
    /// rate or reminder threshold is rejected before anything is written.
    pub fn clock_in(
        store: &mut EntryStore,
        reminder: &mut dyn ReminderScheduler,
        hourly_rate: f64,
        reminder_hours: i64,
        now: NaiveDateTime,
    ) -> AppResult<TimeEntry> {
        let hourly_rate = validate_default_rate(hourly_rate)?;
        let delay = hours_to_millis(validate_reminder_hours(reminder_hours)?)?;

        let entry = store.transaction(|tx| {
            if let Some(active) = load_active_session(tx)? {
                return Err(AppError::SessionAlreadyActive(active.id));
            }

            let mut entry = TimeEntry::open(now, hourly_rate);
            entry.id = insert_entry(tx, &entry)?;

            ttlog(
                tx,
                "clock_in",
                &format!("#{}", entry.id),
                &format!("Clocked in at {} ({:.2}/h)", now, hourly_rate),
            )?;
            Ok(entry)
        })?;

        if let Err(e) = reminder.schedule(delay) {
            warning(format!("Could not schedule reminder: {}", e));
        }

        Ok(entry)
    }

    /// Close the active session at `now`. Without an active session this
    /// is a no-op returning `None`.
    pub fn clock_out(
        store: &mut EntryStore,
        reminder: &mut dyn ReminderScheduler,
        now: NaiveDateTime,
    ) -> AppResult<Option<TimeEntry>> {
        let Some(mut session) = store.active_session()? else {
            return Ok(None);
        };
        session.close_at(now);

        store.transaction(|tx| {
            complete_session(tx, session.id, &now, session.minutes())?;
            ttlog(
                tx,
                "clock_out",
                &format!("#{}", session.id),
                &format!("Clocked out at {} after {} min", now, session.minutes()),
            )
        })?;

        if let Err(e) = reminder.cancel() {
            warning(format!("Could not cancel reminder: {}", e));
        }

        Ok(Some(session))
    }

    /// Time since the session started (zero if `now` is before the start).
    pub fn elapsed(session: &TimeEntry, now: NaiveDateTime) -> Duration {
        let end = session.end_time.unwrap_or(now);
        (end - session.start_time).max(Duration::zero())
    }

    /// Earnings accrued so far by a running session: its captured rate, or
    /// `default_rate` when none was captured. Not persisted; recomputed on
    /// every refresh.
    pub fn session_earnings(session: &TimeEntry, now: NaiveDateTime, default_rate: f64) -> f64 {
        Self::elapsed(session, now).num_seconds() as f64 / 3600.0
            * effective_rate(session, default_rate)
    }
}
