use crate::errors::{AppError, AppResult};
use crate::models::entry::{EntryId, TimeEntry};
use crate::models::entry_kind::EntryKind;
use crate::models::period::Period;
use crate::utils::time::{from_db, to_db};
use chrono::NaiveDateTime;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

const ENTRY_COLUMNS: &str = "id, start_time, end_time, duration_minutes, is_manual, is_submitted, \
     label, kind, is_hidden, squish_group_id, hourly_pay";

/// Predicates the store can be queried (and subscribed) with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryQuery {
    /// Every entry, hidden ones included, newest first.
    All,
    /// Entries not absorbed into a squish, newest first.
    AllVisible,
    /// Visible entries not yet reported to payroll, newest first.
    Unsubmitted,
    /// Visible entries whose start date falls in the period, oldest first.
    ByDateRange(Period),
    /// Hidden originals belonging to one squish group.
    SquishGroup(String),
}

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

fn parse_db_datetime(raw: String) -> Result<NaiveDateTime> {
    from_db(&raw).ok_or_else(|| conversion_error(AppError::InvalidDate(raw)))
}

pub fn map_row(row: &Row) -> Result<TimeEntry> {
    let start_time = parse_db_datetime(row.get("start_time")?)?;
    let end_time = match row.get::<_, Option<String>>("end_time")? {
        Some(raw) => Some(parse_db_datetime(raw)?),
        None => None,
    };

    let kind_str: String = row.get("kind")?;
    let kind = EntryKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(AppError::InvalidEntryKind(kind_str.clone())))?;

    Ok(TimeEntry {
        id: row.get("id")?,
        start_time,
        end_time,
        duration_minutes: row.get("duration_minutes")?,
        is_manual: row.get::<_, i32>("is_manual")? == 1,
        is_submitted: row.get::<_, i32>("is_submitted")? == 1,
        label: row.get("label")?,
        kind,
        is_hidden: row.get::<_, i32>("is_hidden")? == 1,
        squish_group_id: row.get("squish_group_id")?,
        hourly_pay: row.get("hourly_pay")?,
    })
}

fn collect(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> AppResult<Vec<TimeEntry>> {
    let mut stmt = conn.prepare_cached(sql)?;
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Insert a new entry and return its id (`ev.id` is ignored).
pub fn insert_entry(conn: &Connection, ev: &TimeEntry) -> AppResult<EntryId> {
    conn.execute(
        "INSERT INTO time_entries (start_time, end_time, duration_minutes, is_manual, is_submitted,
                                   label, kind, is_hidden, squish_group_id, hourly_pay)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            to_db(&ev.start_time),
            ev.end_time.as_ref().map(to_db),
            ev.duration_minutes,
            ev.is_manual as i32,
            ev.is_submitted as i32,
            ev.label,
            ev.kind.to_db_str(),
            ev.is_hidden as i32,
            ev.squish_group_id,
            ev.hourly_pay,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an entry (all fields except id). Returns the number of rows touched.
pub fn update_entry(conn: &Connection, ev: &TimeEntry) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries
         SET start_time = ?1, end_time = ?2, duration_minutes = ?3,
             is_manual = ?4, is_submitted = ?5, label = ?6, kind = ?7,
             is_hidden = ?8, squish_group_id = ?9, hourly_pay = ?10
         WHERE id = ?11",
        params![
            to_db(&ev.start_time),
            ev.end_time.as_ref().map(to_db),
            ev.duration_minutes,
            ev.is_manual as i32,
            ev.is_submitted as i32,
            ev.label,
            ev.kind.to_db_str(),
            ev.is_hidden as i32,
            ev.squish_group_id,
            ev.hourly_pay,
            ev.id,
        ],
    )?;
    Ok(n)
}

pub fn delete_entry(conn: &Connection, id: EntryId) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?)
}

pub fn load_entry(conn: &Connection, id: EntryId) -> AppResult<Option<TimeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ?1");
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([id], map_row).optional()?)
}

pub fn load_active_session(conn: &Connection) -> AppResult<Option<TimeEntry>> {
    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE end_time IS NULL
         ORDER BY start_time DESC
         LIMIT 1"
    );
    let mut stmt = conn.prepare_cached(&sql)?;
    Ok(stmt.query_row([], map_row).optional()?)
}

pub fn load_entries(conn: &Connection, query: &EntryQuery) -> AppResult<Vec<TimeEntry>> {
    match query {
        EntryQuery::All => collect(
            conn,
            &format!("SELECT {ENTRY_COLUMNS} FROM time_entries ORDER BY start_time DESC, id DESC"),
            [],
        ),
        EntryQuery::AllVisible => collect(
            conn,
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE is_hidden = 0
                 ORDER BY start_time DESC, id DESC"
            ),
            [],
        ),
        EntryQuery::Unsubmitted => collect(
            conn,
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE is_hidden = 0 AND is_submitted = 0
                 ORDER BY start_time DESC, id DESC"
            ),
            [],
        ),
        EntryQuery::ByDateRange(period) => collect(
            conn,
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE is_hidden = 0 AND substr(start_time, 1, 10) BETWEEN ?1 AND ?2
                 ORDER BY start_time ASC, id ASC"
            ),
            params![
                period.start.format("%Y-%m-%d").to_string(),
                period.end.format("%Y-%m-%d").to_string()
            ],
        ),
        EntryQuery::SquishGroup(group) => collect(
            conn,
            &format!(
                "SELECT {ENTRY_COLUMNS} FROM time_entries
                 WHERE is_hidden = 1 AND squish_group_id = ?1
                 ORDER BY start_time ASC, id ASC"
            ),
            [group],
        ),
    }
}

pub fn set_submitted(conn: &Connection, id: EntryId, submitted: bool) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE time_entries SET is_submitted = ?1 WHERE id = ?2",
        params![submitted as i32, id],
    )?)
}

/// Close the open session `id` at `end`.
pub fn complete_session(
    conn: &Connection,
    id: EntryId,
    end: &NaiveDateTime,
    duration_minutes: i64,
) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE time_entries SET end_time = ?1, duration_minutes = ?2
         WHERE id = ?3 AND end_time IS NULL",
        params![to_db(end), duration_minutes, id],
    )?)
}

/// Mark an original as absorbed into `group`. Only the two squish columns are written.
/// Rows that are hidden, summaries or still open are left alone (0 rows touched).
pub fn hide_in_group(conn: &Connection, id: EntryId, group: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE time_entries SET is_hidden = 1, squish_group_id = ?1
         WHERE id = ?2 AND is_hidden = 0 AND kind = 'normal' AND end_time IS NOT NULL",
        params![group, id],
    )?)
}

/// Undo `hide_in_group` for one original.
pub fn restore_from_group(conn: &Connection, id: EntryId) -> AppResult<usize> {
    Ok(conn.execute(
        "UPDATE time_entries SET is_hidden = 0, squish_group_id = NULL WHERE id = ?1",
        [id],
    )?)
}

/// Delete the hidden originals of a group (used when a summary is deleted outright).
pub fn delete_group_originals(conn: &Connection, group: &str) -> AppResult<usize> {
    Ok(conn.execute(
        "DELETE FROM time_entries WHERE is_hidden = 1 AND squish_group_id = ?1",
        [group],
    )?)
}
