//! Snapshot file I/O

mod snapshot;

pub use snapshot::{LoadError, SnapshotFormat, parse_snapshot, read_snapshot};
