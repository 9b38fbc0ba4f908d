//! Squish: merge several entries into one summary block, hiding (not
//! deleting) the originals so the merge can be undone exactly.

use crate::db::log::ttlog;
use crate::db::queries::{
    EntryQuery, delete_entry, hide_in_group, insert_entry, load_entries, load_entry,
    restore_from_group,
};
use crate::db::store::EntryStore;
use crate::errors::{AppError, AppResult};
use crate::models::entry::{EntryId, SQUISHED_LABEL, TimeEntry, shifted_end};
use crate::models::entry_kind::EntryKind;
use std::collections::HashSet;
use uuid::Uuid;

pub struct SquishLogic;

impl SquishLogic {
    /// Compute the summary row for `entries` without touching the store.
    ///
    /// The hourly rate is the plain mean of the per-entry rates, not
    /// weighted by duration.
    pub fn build_summary(entries: &[TimeEntry], group_id: &str) -> AppResult<TimeEntry> {
        let first = entries.first().ok_or(AppError::EmptySquish)?;

        for e in entries {
            if e.is_open() {
                return Err(AppError::OpenEntryInSquish(e.id));
            }
            if e.is_hidden || e.is_squished() {
                return Err(AppError::AlreadySquished(e.id));
            }
        }

        let start_time = entries
            .iter()
            .map(|e| e.start_time)
            .min()
            .unwrap_or(first.start_time);
        let total_minutes: i64 = entries.iter().map(TimeEntry::minutes).sum();
        let average_pay =
            entries.iter().map(|e| e.hourly_pay).sum::<f64>() / entries.len() as f64;

        Ok(TimeEntry {
            id: 0,
            start_time,
            end_time: Some(shifted_end(start_time, total_minutes)),
            duration_minutes: Some(total_minutes),
            is_manual: true,
            is_submitted: false,
            label: Some(SQUISHED_LABEL.to_string()),
            kind: EntryKind::Squished,
            is_hidden: false,
            squish_group_id: Some(group_id.to_string()),
            hourly_pay: average_pay,
        })
    }

    /// Insert the summary and hide every original, as one transaction.
    /// Returns the stored summary.
    ///
    /// The summary is built from the rows as stored when the transaction
    /// runs, so a stale copy of an entry that was squished, closed or
    /// deleted in the meantime is rejected and nothing is written.
    pub fn squish(store: &mut EntryStore, entries: &[TimeEntry]) -> AppResult<TimeEntry> {
        let mut seen = HashSet::new();
        let ids: Vec<EntryId> = entries
            .iter()
            .map(|e| e.id)
            .filter(|id| seen.insert(*id))
            .collect();
        if ids.is_empty() {
            return Err(AppError::EmptySquish);
        }

        let group_id = Uuid::new_v4().to_string();

        store.transaction(|tx| {
            let current = ids
                .iter()
                .map(|id| load_entry(tx, *id)?.ok_or(AppError::EntryNotFound(*id)))
                .collect::<AppResult<Vec<_>>>()?;

            let mut summary = Self::build_summary(&current, &group_id)?;
            summary.id = insert_entry(tx, &summary)?;

            for original in &current {
                if hide_in_group(tx, original.id, &group_id)? == 0 {
                    return Err(AppError::AlreadySquished(original.id));
                }
            }

            let labels: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
            ttlog(
                tx,
                "squish",
                &format!("#{}", summary.id),
                &format!(
                    "Squished {} into {} min block (group {})",
                    labels.join(", "),
                    summary.minutes(),
                    group_id
                ),
            )?;
            Ok(summary)
        })
    }

    /// Load the entries by id and squish them.
    pub fn squish_ids(store: &mut EntryStore, ids: &[EntryId]) -> AppResult<TimeEntry> {
        let entries = ids
            .iter()
            .map(|id| store.require(*id))
            .collect::<AppResult<Vec<_>>>()?;
        Self::squish(store, &entries)
    }

    /// Delete the summary and restore its originals, as one transaction.
    /// Returns the restored originals. Running it again on a summary that is
    /// already gone finds nothing and changes nothing.
    pub fn unsquish(store: &mut EntryStore, summary: &TimeEntry) -> AppResult<Vec<TimeEntry>> {
        if !summary.is_squished() {
            return Err(AppError::NotSquished(summary.id));
        }

        store.transaction(|tx| {
            let mut originals = match &summary.squish_group_id {
                Some(group) => load_entries(tx, &EntryQuery::SquishGroup(group.clone()))?,
                None => Vec::new(),
            };

            let removed = delete_entry(tx, summary.id)?;

            for original in originals.iter_mut() {
                restore_from_group(tx, original.id)?;
                original.is_hidden = false;
                original.squish_group_id = None;
            }

            if removed > 0 || !originals.is_empty() {
                ttlog(
                    tx,
                    "unsquish",
                    &format!("#{}", summary.id),
                    &format!("Restored {} entries", originals.len()),
                )?;
            }
            Ok(originals)
        })
    }

    /// Unsquish by id. A missing id is a no-op.
    pub fn unsquish_id(store: &mut EntryStore, id: EntryId) -> AppResult<Vec<TimeEntry>> {
        match store.get(id)? {
            Some(summary) => Self::unsquish(store, &summary),
            None => Ok(Vec::new()),
        }
    }
}
