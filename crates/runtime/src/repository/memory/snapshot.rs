//! In-memory SnapshotRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use playground_core::{PlaygroundId, PlaygroundSnapshot};

use crate::repository::{RepositoryError, Result, SnapshotRepository};

/// In-memory implementation of SnapshotRepository.
pub struct InMemorySnapshotRepo {
    snapshots: RwLock<BTreeMap<(PlaygroundId, u64), PlaygroundSnapshot>>,
}

impl InMemorySnapshotRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored snapshots across all playgrounds.
    pub fn len(&self) -> usize {
        self.snapshots.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySnapshotRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotRepository for InMemorySnapshotRepo {
    fn save(&self, snapshot: &PlaygroundSnapshot) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.insert((snapshot.id, snapshot.turn), snapshot.clone());
        Ok(())
    }

    fn load(&self, id: PlaygroundId, turn: u64) -> Result<Option<PlaygroundSnapshot>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots.get(&(id, turn)).cloned())
    }

    fn exists(&self, id: PlaygroundId, turn: u64) -> bool {
        self.snapshots
            .read()
            .map(|snapshots| snapshots.contains_key(&(id, turn)))
            .unwrap_or(false)
    }

    fn delete(&self, id: PlaygroundId, turn: u64) -> Result<()> {
        let mut snapshots = self
            .snapshots
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        snapshots.remove(&(id, turn));
        Ok(())
    }

    fn list_turns(&self, id: PlaygroundId) -> Result<Vec<u64>> {
        let snapshots = self
            .snapshots
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(snapshots
            .range((id, 0)..=(id, u64::MAX))
            .map(|(&(_, turn), _)| turn)
            .collect())
    }
}
