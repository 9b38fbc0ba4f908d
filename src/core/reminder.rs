//! Clock-in reminders. At most one reminder is pending at a time; scheduling
//! a new one replaces the previous one.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::time::{from_db, to_db};
use chrono::{Duration, NaiveDateTime};
use rusqlite::{OptionalExtension, params};

pub const REMINDER_MESSAGE: &str = "You are still clocked in!";

pub trait ReminderScheduler {
    /// Arrange for a reminder `delay_millis` from now, replacing any pending one.
    fn schedule(&mut self, delay_millis: i64) -> AppResult<()>;

    /// Drop the pending reminder, if any.
    fn cancel(&mut self) -> AppResult<()>;
}

pub fn hours_to_millis(hours: i64) -> AppResult<i64> {
    hours
        .checked_mul(60 * 60 * 1000)
        .ok_or(AppError::InvalidReminderHours(hours))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReminder {
    pub fire_at: NaiveDateTime,
    pub message: String,
}

impl PendingReminder {
    pub fn is_due(&self, now: NaiveDateTime) -> bool {
        self.fire_at <= now
    }
}

/// Keeps the pending reminder in the `reminders` table so a later
/// invocation (e.g. `status`) can tell the user it has fired.
pub struct StoredReminder {
    pool: DbPool,
    now: NaiveDateTime,
}

impl StoredReminder {
    pub fn open(path: &str, now: NaiveDateTime) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?, now)
    }

    pub fn in_memory(now: NaiveDateTime) -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?, now)
    }

    fn from_pool(pool: DbPool, now: NaiveDateTime) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self { pool, now })
    }

    pub fn pending(&self) -> AppResult<Option<PendingReminder>> {
        let row = self
            .pool
            .conn
            .query_row(
                "SELECT fire_at, message FROM reminders WHERE id = 1",
                [],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()?;

        Ok(row.and_then(|(fire_at, message)| {
            from_db(&fire_at).map(|fire_at| PendingReminder { fire_at, message })
        }))
    }

    /// The pending reminder if its fire time has passed.
    pub fn due(&self, now: NaiveDateTime) -> AppResult<Option<PendingReminder>> {
        Ok(self.pending()?.filter(|r| r.is_due(now)))
    }
}

impl ReminderScheduler for StoredReminder {
    fn schedule(&mut self, delay_millis: i64) -> AppResult<()> {
        let fire_at = Duration::try_milliseconds(delay_millis)
            .filter(|d| *d >= Duration::zero())
            .and_then(|d| self.now.checked_add_signed(d))
            .ok_or(AppError::InvalidReminderDelay(delay_millis))?;
        self.pool.conn.execute(
            "INSERT OR REPLACE INTO reminders (id, fire_at, message) VALUES (1, ?1, ?2)",
            params![to_db(&fire_at), REMINDER_MESSAGE],
        )?;
        Ok(())
    }

    fn cancel(&mut self) -> AppResult<()> {
        self.pool.conn.execute("DELETE FROM reminders", [])?;
        Ok(())
    }
}
