//! Infrastructure adapters for tablesmith.
//!
//! This crate implements the ports defined in
//! `tablesmith_core::application::ports`. All I/O (disk, database, snapshot
//! files) lives here.

pub mod filesystem;
pub mod metadata;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
#[cfg(feature = "mysql")]
pub use metadata::MySqlMetadataProvider;
pub use metadata::{ConnectionSettings, Snapshot, SnapshotMetadataProvider, connect};
