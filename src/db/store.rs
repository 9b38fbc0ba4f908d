//! The entry store: the persistent collection of time entries plus a
//! subscription interface that pushes full query snapshots after each commit.

use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::queries::{self, EntryQuery};
use crate::errors::{AppError, AppResult};
use crate::models::entry::{EntryId, TimeEntry};
use chrono::NaiveDateTime;
use rusqlite::{Connection, Transaction};

pub type SubscriptionId = u64;

/// Receives the complete result set of its query; each delivery replaces the previous one.
pub type EntryListener = Box<dyn FnMut(&[TimeEntry])>;

struct Subscription {
    id: SubscriptionId,
    query: EntryQuery,
    listener: EntryListener,
}

pub struct EntryStore {
    pool: DbPool,
    subscriptions: Vec<Subscription>,
    next_subscription: SubscriptionId,
}

impl EntryStore {
    /// Open (or create) the database at `path` and bring its schema up to date.
    pub fn open(path: &str) -> AppResult<Self> {
        Self::from_pool(DbPool::new(path)?)
    }

    pub fn in_memory() -> AppResult<Self> {
        Self::from_pool(DbPool::in_memory()?)
    }

    fn from_pool(pool: DbPool) -> AppResult<Self> {
        init_db(&pool.conn)?;
        Ok(Self {
            pool,
            subscriptions: Vec::new(),
            next_subscription: 1,
        })
    }

    pub fn conn(&self) -> &Connection {
        &self.pool.conn
    }

    // ---------------------------
    // Reads
    // ---------------------------

    pub fn get(&self, id: EntryId) -> AppResult<Option<TimeEntry>> {
        queries::load_entry(self.conn(), id)
    }

    /// Like `get`, but a missing entry is an error.
    pub fn require(&self, id: EntryId) -> AppResult<TimeEntry> {
        self.get(id)?.ok_or(AppError::EntryNotFound(id))
    }

    pub fn active_session(&self) -> AppResult<Option<TimeEntry>> {
        queries::load_active_session(self.conn())
    }

    pub fn query(&self, query: &EntryQuery) -> AppResult<Vec<TimeEntry>> {
        queries::load_entries(self.conn(), query)
    }

    // ---------------------------
    // Writes
    // ---------------------------

    /// Insert `entry` and return it with its assigned id.
    pub fn insert(&mut self, entry: &TimeEntry) -> AppResult<TimeEntry> {
        let id = self.transaction(|tx| queries::insert_entry(tx, entry))?;
        Ok(TimeEntry {
            id,
            ..entry.clone()
        })
    }

    pub fn update(&mut self, entry: &TimeEntry) -> AppResult<()> {
        let n = self.transaction(|tx| queries::update_entry(tx, entry))?;
        if n == 0 {
            return Err(AppError::EntryNotFound(entry.id));
        }
        Ok(())
    }

    /// Delete by id. Returns false when nothing matched.
    pub fn delete(&mut self, id: EntryId) -> AppResult<bool> {
        let n = self.transaction(|tx| queries::delete_entry(tx, id))?;
        Ok(n > 0)
    }

    pub fn set_submitted(&mut self, id: EntryId, submitted: bool) -> AppResult<()> {
        let n = self.transaction(|tx| queries::set_submitted(tx, id, submitted))?;
        if n == 0 {
            return Err(AppError::EntryNotFound(id));
        }
        Ok(())
    }

    /// Close the open entry `id`. Returns false when it was not open.
    pub fn complete_session(
        &mut self,
        id: EntryId,
        end: &NaiveDateTime,
        duration_minutes: i64,
    ) -> AppResult<bool> {
        let n = self.transaction(|tx| queries::complete_session(tx, id, end, duration_minutes))?;
        Ok(n > 0)
    }

    /// Run a multi-row write as one unit. Subscribers are notified only
    /// after a successful commit; on error nothing is written.
    pub fn transaction<F, T>(&mut self, func: F) -> AppResult<T>
    where
        F: FnOnce(&Transaction<'_>) -> AppResult<T>,
    {
        let out = self.pool.with_transaction(func)?;
        self.notify()?;
        Ok(out)
    }

    // ---------------------------
    // Subscriptions
    // ---------------------------

    /// Register `listener` for `query`. It receives the current snapshot
    /// immediately and a fresh one after every committed mutation.
    pub fn subscribe<F>(&mut self, query: EntryQuery, listener: F) -> AppResult<SubscriptionId>
    where
        F: FnMut(&[TimeEntry]) + 'static,
    {
        let id = self.next_subscription;
        self.next_subscription += 1;

        let mut sub = Subscription {
            id,
            query,
            listener: Box::new(listener),
        };
        let snapshot = queries::load_entries(&self.pool.conn, &sub.query)?;
        (sub.listener)(&snapshot);

        self.subscriptions.push(sub);
        Ok(id)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    fn notify(&mut self) -> AppResult<()> {
        for sub in self.subscriptions.iter_mut() {
            let snapshot = queries::load_entries(&self.pool.conn, &sub.query)?;
            (sub.listener)(&snapshot);
        }
        Ok(())
    }
}
