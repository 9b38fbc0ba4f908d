//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::entry::EntryId;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid hourly rate: {0}")]
    InvalidRate(String),

    #[error("Invalid reminder hours: {0} (allowed range is 1-12)")]
    InvalidReminderHours(i64),

    #[error("Invalid reminder delay: {0} ms")]
    InvalidReminderDelay(i64),

    #[error("Invalid entry kind: {0}")]
    InvalidEntryKind(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("End time must be after start time ({start} -> {end})")]
    InvalidRange { start: String, end: String },

    #[error("A session is already active (entry #{0}); clock out first")]
    SessionAlreadyActive(EntryId),

    #[error("Entry #{0} not found")]
    EntryNotFound(EntryId),

    #[error("Nothing to squish: select at least one entry")]
    EmptySquish,

    #[error("Entry #{0} is still open and cannot be squished")]
    OpenEntryInSquish(EntryId),

    #[error("Entry #{0} is already part of a squished block")]
    AlreadySquished(EntryId),

    #[error("Entry #{0} is not a squished block")]
    NotSquished(EntryId),

    #[error("Entry #{0} is hidden inside a squished block; unsquish it first")]
    HiddenEntry(EntryId),

    #[error("Entry #{0} is a squished block; unsquish it before editing")]
    SquishedEntry(EntryId),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
