use crate::errors::AppResult;
use rusqlite::{Connection, params};

/// Append one row to the audit trail. Called inside the same transaction
/// as the mutation it describes, so a rolled back change leaves no trace.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now', 'localtime'), ?1, ?2, ?3)",
    )?
    .execute(params![operation, target, message])?;
    Ok(())
}
