pub mod calculator;
pub mod entries;
pub mod log;
pub mod prefs;
pub mod reminder;
pub mod session;
pub mod squish;
