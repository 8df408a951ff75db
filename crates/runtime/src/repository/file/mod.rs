//! File-based repository implementations.

mod snapshot;

pub use snapshot::{FileSnapshotRepository, SnapshotFormat};
