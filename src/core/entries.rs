use crate::db::log::ttlog;
use crate::db::queries::{delete_entry, delete_group_originals, insert_entry, set_submitted, update_entry};
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{EntryId, TimeEntry};
use chrono::NaiveDateTime;

/// Changes requested for an existing entry. `None` keeps the current value;
/// an empty label clears it.
#[derive(Debug, Clone, Default)]
pub struct EntryEdit {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub label: Option<String>,
}

fn validate_range(start: NaiveDateTime, end: NaiveDateTime) -> AppResult<()> {
    if end <= start {
        return Err(AppError::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    Ok(())
}

fn normalize_label(label: Option<String>) -> Option<String> {
    label
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
}

/// Manual entry management: insert, edit, delete, submit.
pub struct EntryLogic;

impl EntryLogic {
    pub fn add_manual(
        store: &mut EntryStore,
        start: NaiveDateTime,
        end: NaiveDateTime,
        label: Option<String>,
        hourly_rate: f64,
    ) -> AppResult<TimeEntry> {
        validate_range(start, end)?;

        let mut entry = TimeEntry::closed(start, end, hourly_rate, normalize_label(label), true);

        store.transaction(|tx| {
            entry.id = insert_entry(tx, &entry)?;
            ttlog(
                tx,
                "add",
                &format!("#{}", entry.id),
                &format!("{} → {} ({} min)", start, end, entry.minutes()),
            )
        })?;

        Ok(entry)
    }

    pub fn edit(store: &mut EntryStore, id: EntryId, changes: EntryEdit) -> AppResult<TimeEntry> {
        let mut entry = store.require(id)?;
        if entry.is_hidden {
            return Err(AppError::HiddenEntry(id));
        }
        if entry.is_squished() {
            return Err(AppError::SquishedEntry(id));
        }

        if let Some(start) = changes.start_time {
            entry.start_time = start;
        }
        if let Some(label) = changes.label {
            entry.label = normalize_label(Some(label));
        }

        if let Some(end) = changes.end_time.or(entry.end_time) {
            validate_range(entry.start_time, end)?;
            entry.close_at(end);
        }
        entry.is_manual = true;

        store.transaction(|tx| {
            update_entry(tx, &entry)?;
            ttlog(
                tx,
                "edit",
                &format!("#{}", id),
                &format!(
                    "{} → {}",
                    entry.start_time,
                    entry
                        .end_time
                        .map(|e| e.to_string())
                        .unwrap_or_else(|| "open".into())
                ),
            )
        })?;

        Ok(entry)
    }

    /// Delete an entry. Deleting a squished block also deletes the
    /// originals hidden inside it. Returns the number of rows removed.
    pub fn delete(store: &mut EntryStore, id: EntryId) -> AppResult<usize> {
        let entry = store.require(id)?;
        if entry.is_hidden {
            return Err(AppError::HiddenEntry(id));
        }

        store.transaction(|tx| {
            let mut removed = delete_entry(tx, id)?;
            if entry.is_squished()
                && let Some(group) = &entry.squish_group_id
            {
                removed += delete_group_originals(tx, group)?;
            }
            ttlog(
                tx,
                "del",
                &format!("#{}", id),
                &format!("Deleted {} row(s)", removed),
            )?;
            Ok(removed)
        })
    }

    /// Mark (or unmark) entries as reported to payroll, all or nothing.
    pub fn set_submitted(store: &mut EntryStore, ids: &[EntryId], submitted: bool) -> AppResult<()> {
        store.transaction(|tx| {
            for id in ids {
                if set_submitted(tx, *id, submitted)? == 0 {
                    return Err(AppError::EntryNotFound(*id));
                }
            }
            let targets: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
            ttlog(
                tx,
                "submit",
                &targets.join(","),
                if submitted { "Marked as submitted" } else { "Marked as unsubmitted" },
            )
        })
    }
}
