//! Staged, validated playground construction.
//!
//! ```text
//! validate ─▶ grid ─▶ blocks ─▶ hero ─▶ exit ─▶ enemies ─▶ look around
//! ```
//!
//! Each stage reserves all the free cells it needs before placing anything,
//! so a failing stage never leaves half its objects on the map.
mod factory;
mod validation;

pub use factory::PlaygroundFactory;
pub use validation::{
    AgentStat, ConfigurationError, Dimension, validate_agent_stats, validate_capacity,
    validate_dimensions, validate_params, validate_percentages,
};

use crate::playground::{Playground, PlaygroundError};
use crate::rng::PlacementRng;
use crate::state::{AgentState, AgentStats, Coordinates, ObjectKind, PlaygroundId};

/// Places objects at random free cells of a fresh playground.
///
/// Sampling is without replacement over the set of cells that were free when
/// the builder was created, so a pick can never target an occupied cell.
#[derive(Debug)]
pub struct PlaygroundBuilder {
    playground: Playground,
    rng: PlacementRng,
    free: Vec<Coordinates>,
}

impl PlaygroundBuilder {
    pub fn new(
        id: PlaygroundId,
        width: u32,
        height: u32,
        seed: u64,
    ) -> Result<Self, ConfigurationError> {
        let playground = Playground::new(id, width, height)?;
        let free = playground.grid().free_cells();
        Ok(Self {
            playground,
            rng: PlacementRng::new(seed),
            free,
        })
    }

    /// Free cells not yet claimed by a stage.
    pub fn free_cells(&self) -> usize {
        self.free.len()
    }

    pub fn with_blocks(mut self, count: u32) -> Result<Self, PlaygroundError> {
        self.reserve(count)?;
        for _ in 0..count {
            let at = self.take_free_cell()?;
            self.playground.add_block(at)?;
        }
        tracing::trace!(count, "placed blocks");
        Ok(self)
    }

    pub fn with_hero(mut self, stats: AgentStats) -> Result<Self, PlaygroundError> {
        validate_agent_stats(ObjectKind::Hero, stats)?;
        if let Some(existing) = self.playground.hero() {
            return Err(ConfigurationError::HeroAlreadyPlaced { existing }.into());
        }
        self.reserve(1)?;

        let at = self.take_free_cell()?;
        let hero = self.playground.place_hero(AgentState::new(stats), at)?;
        tracing::trace!(%hero, %at, "placed hero");
        Ok(self)
    }

    pub fn with_exit(mut self) -> Result<Self, PlaygroundError> {
        if let Some(existing) = self.playground.exit() {
            return Err(ConfigurationError::ExitAlreadyPlaced { existing }.into());
        }
        self.reserve(1)?;

        let at = self.take_free_cell()?;
        let exit = self.playground.place_exit(at)?;
        tracing::trace!(%exit, %at, "placed exit");
        Ok(self)
    }

    /// Places `count` enemies; the n-th enemy gets turn order n.
    pub fn with_enemies(mut self, count: u32, stats: AgentStats) -> Result<Self, PlaygroundError> {
        if count == 0 {
            return Ok(self);
        }
        validate_agent_stats(ObjectKind::Enemy, stats)?;
        self.reserve(count)?;

        let first = self.playground.enemies().len() as u32;
        for order in first..first + count {
            let at = self.take_free_cell()?;
            let enemy = AgentState::new(stats).with_order_in_turn_queue(order);
            self.playground.place_enemy(enemy, at)?;
        }
        tracing::trace!(count, "placed enemies");
        Ok(self)
    }

    /// Finishes construction: every agent looks around once.
    pub fn build(mut self) -> Playground {
        self.playground.look_around_everyone();
        tracing::trace!(
            playground = %self.playground.id(),
            free = self.free.len(),
            "playground assembled"
        );
        self.playground
    }

    fn reserve(&self, required: u32) -> Result<(), ConfigurationError> {
        let available = self.free.len() as u32;
        if required > available {
            return Err(ConfigurationError::NotEnoughFreeCells {
                required,
                available,
            });
        }
        Ok(())
    }

    fn take_free_cell(&mut self) -> Result<Coordinates, ConfigurationError> {
        self.reserve(1)?;
        let index = self.rng.below(self.free.len());
        Ok(self.free.swap_remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaygroundConfig;

    fn builder(seed: u64) -> PlaygroundBuilder {
        PlaygroundBuilder::new(PlaygroundId(1), 10, 10, seed).unwrap()
    }

    #[test]
    fn stages_populate_free_cells() {
        let pg = builder(3)
            .with_blocks(10)
            .unwrap()
            .with_hero(PlaygroundConfig::DEFAULT_HERO_STATS)
            .unwrap()
            .with_exit()
            .unwrap()
            .with_enemies(3, PlaygroundConfig::DEFAULT_ENEMY_STATS)
            .unwrap()
            .build();

        assert_eq!(pg.blocks().len(), 10);
        assert_eq!(pg.enemies().len(), 3);
        assert!(pg.hero().is_some() && pg.exit().is_some());

        let orders: Vec<u32> = pg
            .enemies()
            .iter()
            .map(|&id| pg.agent(id).unwrap().order_in_turn_queue())
            .collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert!(!pg.hero_state().unwrap().visible_cells().is_empty());
    }

    #[test]
    fn same_seed_same_layout() {
        let layout = |seed| {
            builder(seed)
                .with_blocks(15)
                .unwrap()
                .build()
                .occupancy()
                .into_iter()
                .map(|view| view.kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(layout(11), layout(11));
    }

    #[test]
    fn stage_without_room_places_nothing() {
        let err = builder(0).with_blocks(65).unwrap_err();
        assert_eq!(
            err,
            PlaygroundError::Configuration(ConfigurationError::NotEnoughFreeCells {
                required: 65,
                available: 64,
            })
        );
    }

    #[test]
    fn hero_stats_are_validated() {
        let err = builder(0).with_hero(AgentStats::new(1, 3, 0)).unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::Configuration(ConfigurationError::NonPositiveAgentStat {
                role: ObjectKind::Hero,
                stat: AgentStat::Stamina,
            })
        ));
    }

    #[test]
    fn second_exit_is_rejected() {
        let err = builder(0).with_exit().unwrap().with_exit().unwrap_err();
        assert!(matches!(
            err,
            PlaygroundError::Configuration(ConfigurationError::ExitAlreadyPlaced { .. })
        ));
    }
}
