use crate::models::entry::SQUISHED_LABEL;
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if `table` has a column named `column`.
fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{}')", table))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `time_entries` table with the current schema.
fn create_time_entries_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS time_entries (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time       TEXT NOT NULL,
            end_time         TEXT,
            duration_minutes INTEGER,
            is_manual        INTEGER NOT NULL DEFAULT 0,
            is_submitted     INTEGER NOT NULL DEFAULT 0,
            label            TEXT,
            kind             TEXT NOT NULL DEFAULT 'normal' CHECK(kind IN ('normal','squished')),
            is_hidden        INTEGER NOT NULL DEFAULT 0,
            squish_group_id  TEXT,
            hourly_pay       REAL NOT NULL DEFAULT 0.0,
            CHECK (is_hidden = 0 OR squish_group_id IS NOT NULL)
        );
        "#,
    )?;
    Ok(())
}

/// Single-row table holding the pending clock-in reminder, if any.
fn create_reminders_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            id       INTEGER PRIMARY KEY CHECK (id = 1),
            fire_at  TEXT NOT NULL,
            message  TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn create_indexes(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE INDEX IF NOT EXISTS idx_entries_start ON time_entries(start_time);
        CREATE INDEX IF NOT EXISTS idx_entries_group ON time_entries(squish_group_id);
        "#,
    )?;
    Ok(())
}

/// Older databases tagged squish summaries only through their label.
/// Add the typed `kind` column and convert those rows.
fn migrate_label_to_kind(conn: &Connection) -> Result<()> {
    let version = "20250301_0002_entry_kind_column";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if table_has_column(conn, "time_entries", "kind")? {
        return Ok(());
    }

    conn.execute_batch("BEGIN;")?;
    let applied = (|| -> Result<usize> {
        conn.execute(
            "ALTER TABLE time_entries ADD COLUMN kind TEXT NOT NULL DEFAULT 'normal'",
            [],
        )?;
        let converted = conn.execute(
            "UPDATE time_entries SET kind = 'squished' WHERE label = ?1",
            [SQUISHED_LABEL],
        )?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now', 'localtime'), 'migration_applied', ?1, 'Added kind column to time_entries')",
            [version],
        )?;
        Ok(converted)
    })();

    match applied {
        Ok(converted) => {
            conn.execute_batch("COMMIT;")?;
            success(format!(
                "Migration applied: {} → {} squished block(s) converted",
                version, converted
            ));
            Ok(())
        }
        Err(e) => {
            conn.execute_batch("ROLLBACK;")?;
            Err(e)
        }
    }
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    if table_exists(conn, "time_entries")? {
        migrate_label_to_kind(conn)?;
    } else {
        create_time_entries_table(conn)?;
    }

    create_reminders_table(conn)?;
    create_indexes(conn)?;

    Ok(())
}
