//! One-call construction from high-level parameters.

use crate::config::PlaygroundParams;
use crate::playground::{Playground, PlaygroundError};
use crate::state::PlaygroundId;

use super::{PlaygroundBuilder, validate_params};

/// Creates fully populated playgrounds with sequential ids.
///
/// All parameters are validated before any grid is allocated; a rejected
/// request does not consume an id.
#[derive(Clone, Debug)]
pub struct PlaygroundFactory {
    next_id: u64,
}

impl Default for PlaygroundFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaygroundFactory {
    pub fn new() -> Self {
        Self::starting_at(PlaygroundId(1))
    }

    pub fn starting_at(first: PlaygroundId) -> Self {
        Self { next_id: first.0 }
    }

    /// Id the next successful call will receive.
    pub fn peek_next_id(&self) -> PlaygroundId {
        PlaygroundId(self.next_id)
    }

    pub fn create(&mut self, params: &PlaygroundParams) -> Result<Playground, PlaygroundError> {
        validate_params(params)?;

        let id = PlaygroundId(self.next_id);
        let playground = PlaygroundBuilder::new(id, params.width, params.height, params.seed)?
            .with_blocks(params.block_count())?
            .with_hero(params.hero)?
            .with_exit()?
            .with_enemies(params.enemy_count(), params.enemy)?
            .build();

        self.next_id = self.next_id.wrapping_add(1);
        Ok(playground)
    }

    /// Default agent stats and seed, caller-chosen size and densities.
    pub fn create_standard(
        &mut self,
        width: u32,
        height: u32,
        blocks_percent: u32,
        enemies_percent: u32,
    ) -> Result<Playground, PlaygroundError> {
        self.create(&PlaygroundParams::new(
            width,
            height,
            blocks_percent,
            enemies_percent,
        ))
    }
}
