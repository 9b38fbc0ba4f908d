pub mod entry;
pub mod entry_kind;
pub mod period;
pub mod summary;
