//! Repository layer for playground snapshots.
//!
//! Repositories persist the save/restore representation defined by
//! `playground-core`. Border blocks are never stored; the core regenerates
//! them from the grid dimensions on restore.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::{FileSnapshotRepository, SnapshotFormat};
pub use memory::InMemorySnapshotRepo;
pub use traits::SnapshotRepository;
