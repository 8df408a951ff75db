//! Repository contract for saving and loading playground snapshots.

use playground_core::{PlaygroundId, PlaygroundSnapshot};

use super::Result;

/// Persistence for playground snapshots, keyed by playground id and turn.
///
/// Implementations must be safe to share between threads; a single
/// playground is still only mutated by one executor at a time.
pub trait SnapshotRepository: Send + Sync {
    /// Save a snapshot under its own id and turn, replacing any previous one.
    fn save(&self, snapshot: &PlaygroundSnapshot) -> Result<()>;

    /// Load the snapshot taken at `turn`.
    fn load(&self, id: PlaygroundId, turn: u64) -> Result<Option<PlaygroundSnapshot>>;

    /// Check if a snapshot exists
    fn exists(&self, id: PlaygroundId, turn: u64) -> bool;

    /// Delete a snapshot. Missing snapshots are not an error.
    fn delete(&self, id: PlaygroundId, turn: u64) -> Result<()>;

    /// Turns with a stored snapshot, ascending.
    fn list_turns(&self, id: PlaygroundId) -> Result<Vec<u64>>;

    /// The snapshot with the highest turn, if any.
    fn latest(&self, id: PlaygroundId) -> Result<Option<PlaygroundSnapshot>> {
        match self.list_turns(id)?.last() {
            Some(&turn) => self.load(id, turn),
            None => Ok(None),
        }
    }
}
