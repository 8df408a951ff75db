//! Registry of independent playgrounds.
//!
//! Playgrounds share nothing, so the registry only hands out one mutable
//! borrow at a time per call and never holds a playground across calls.

use std::collections::BTreeMap;

use playground_core::{Playground, PlaygroundFactory, PlaygroundId, PlaygroundParams};

use crate::api::{Result, RuntimeError};
use crate::repository::SnapshotRepository;

#[derive(Debug, Default)]
pub struct PlaygroundRegistry {
    factory: PlaygroundFactory,
    playgrounds: BTreeMap<PlaygroundId, Playground>,
}

impl PlaygroundRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and registers a new playground.
    pub fn create(&mut self, params: &PlaygroundParams) -> Result<PlaygroundId> {
        // Skip ids taken by inserted or restored playgrounds.
        while self.playgrounds.contains_key(&self.factory.peek_next_id()) {
            let next = self.factory.peek_next_id().0.wrapping_add(1);
            self.factory = PlaygroundFactory::starting_at(PlaygroundId(next));
        }

        let playground = self.factory.create(params)?;
        let id = playground.id();
        self.playgrounds.insert(id, playground);
        tracing::debug!(%id, "playground registered");
        Ok(id)
    }

    /// Registers an existing playground under its own id.
    pub fn insert(&mut self, playground: Playground) -> Result<()> {
        let id = playground.id();
        if self.playgrounds.contains_key(&id) {
            return Err(RuntimeError::DuplicatePlayground { id });
        }
        self.playgrounds.insert(id, playground);
        Ok(())
    }

    pub fn get(&self, id: PlaygroundId) -> Result<&Playground> {
        self.playgrounds
            .get(&id)
            .ok_or(RuntimeError::UnknownPlayground { id })
    }

    pub fn get_mut(&mut self, id: PlaygroundId) -> Result<&mut Playground> {
        self.playgrounds
            .get_mut(&id)
            .ok_or(RuntimeError::UnknownPlayground { id })
    }

    /// Unregisters a playground and hands it to the caller.
    pub fn remove(&mut self, id: PlaygroundId) -> Result<Playground> {
        self.playgrounds
            .remove(&id)
            .ok_or(RuntimeError::UnknownPlayground { id })
    }

    pub fn ids(&self) -> impl Iterator<Item = PlaygroundId> + '_ {
        self.playgrounds.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.playgrounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playgrounds.is_empty()
    }

    /// Saves the current state of one playground. Returns the saved turn.
    pub fn save(&self, id: PlaygroundId, repository: &dyn SnapshotRepository) -> Result<u64> {
        let snapshot = self.get(id)?.snapshot();
        let turn = snapshot.turn;
        repository.save(&snapshot)?;
        Ok(turn)
    }

    /// Replaces (or registers) a playground from its latest stored snapshot.
    pub fn restore_latest(
        &mut self,
        id: PlaygroundId,
        repository: &dyn SnapshotRepository,
    ) -> Result<u64> {
        let snapshot = repository
            .latest(id)?
            .ok_or(RuntimeError::SnapshotNotFound { id })?;
        let playground = Playground::from_snapshot(snapshot)?;
        let turn = playground.turn();
        self.playgrounds.insert(id, playground);
        tracing::debug!(%id, turn, "playground restored");
        Ok(turn)
    }
}
