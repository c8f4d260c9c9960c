//! Application ports (traits) for external dependencies.
//!
//! Adapters in `tablesmith-adapters` implement these.
//!
//! - `MetadataProvider`: raw catalog metadata (tables, columns, keys)
//! - `Filesystem`: where rendered artifacts go

pub mod output;

pub use output::{ColumnEntry, Filesystem, MetadataProvider, TableEntry};
