//! Database layer: connection, migrations, row mapping, the entry store and the audit log.

pub mod initialize;
pub mod log;
pub mod migrate;
pub mod pool;
pub mod queries;
pub mod store;
