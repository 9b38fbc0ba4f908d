use super::entry_kind::EntryKind;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub type EntryId = i64;

/// Label shown on the summary row created by a squish.
pub const SQUISHED_LABEL: &str = "Squished Block";

/// One worked interval, open (active session) or closed.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeEntry {
    pub id: EntryId,                       // ⇔ time_entries.id (0 until inserted)
    pub start_time: NaiveDateTime,         // ⇔ time_entries.start_time (TEXT ISO 8601)
    pub end_time: Option<NaiveDateTime>,   // ⇔ time_entries.end_time (NULL while open)
    pub duration_minutes: Option<i64>,     // ⇔ time_entries.duration_minutes
    pub is_manual: bool,                   // ⇔ time_entries.is_manual
    pub is_submitted: bool,                // ⇔ time_entries.is_submitted
    pub label: Option<String>,             // ⇔ time_entries.label
    pub kind: EntryKind,                   // ⇔ time_entries.kind ('normal' | 'squished')
    pub is_hidden: bool,                   // ⇔ time_entries.is_hidden
    pub squish_group_id: Option<String>,   // ⇔ time_entries.squish_group_id
    pub hourly_pay: f64,                   // ⇔ time_entries.hourly_pay
}

impl TimeEntry {
    /// A freshly clocked-in session: no end time, no duration yet.
    pub fn open(start_time: NaiveDateTime, hourly_pay: f64) -> Self {
        Self {
            id: 0,
            start_time,
            end_time: None,
            duration_minutes: None,
            is_manual: false,
            is_submitted: false,
            label: None,
            kind: EntryKind::Normal,
            is_hidden: false,
            squish_group_id: None,
            hourly_pay,
        }
    }

    /// A closed entry spanning `start_time..end_time`.
    pub fn closed(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        hourly_pay: f64,
        label: Option<String>,
        is_manual: bool,
    ) -> Self {
        Self {
            end_time: Some(end_time),
            duration_minutes: Some(minutes_between(start_time, end_time)),
            is_manual,
            label,
            ..Self::open(start_time, hourly_pay)
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    pub fn is_squished(&self) -> bool {
        self.kind.is_squished()
    }

    /// Calendar date the entry is filed under.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Worked minutes, treating a missing duration as zero.
    pub fn minutes(&self) -> i64 {
        self.duration_minutes.unwrap_or(0)
    }

    pub fn hours(&self) -> f64 {
        self.minutes() as f64 / 60.0
    }

    /// Close the entry at `end`, recomputing its duration.
    pub fn close_at(&mut self, end: NaiveDateTime) {
        self.end_time = Some(end);
        self.duration_minutes = Some(minutes_between(self.start_time, end));
    }

    pub fn display_label(&self) -> &str {
        match (&self.label, self.kind) {
            (Some(l), _) if !l.trim().is_empty() => l,
            (_, EntryKind::Squished) => SQUISHED_LABEL,
            _ => "",
        }
    }
}

/// Whole minutes from `start` to `end`, never negative.
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> i64 {
    (end - start).num_minutes().max(0)
}

/// `start + minutes`, the end time of a block of contiguous work.
pub fn shifted_end(start: NaiveDateTime, minutes: i64) -> NaiveDateTime {
    start + Duration::minutes(minutes)
}
