//! Abstraction for sourcing hero and enemy intent.
//!
//! Runtime users plug in [`DecisionProvider`] implementations so the
//! simulation can run with scripted fixtures, random policies, or an external
//! trained model.
use playground_core::{AgentAbility, AgentAction, Coordinates, ObjectId, Playground};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand::seq::SliceRandom;

use super::errors::Result;

/// What an agent wants to do with its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    /// Walk these cells in order, one king move each.
    Path(Vec<Coordinates>),
    Ability(AgentAbility),
    Wait,
}

/// Trait for choosing an agent's action from the current playground.
///
/// Different implementations can handle:
/// - Scripted/replayed decisions
/// - Random policies for smoke runs
/// - Remote or trained policies
/// - Testing fixtures
pub trait DecisionProvider: Send {
    /// Decide what `agent` does next.
    ///
    /// # Arguments
    /// * `agent` - The hero or enemy that needs to act
    /// * `playground` - Read-only view of the current playground
    fn decide(&mut self, agent: ObjectId, playground: &Playground) -> Result<Decision>;
}

impl<P: DecisionProvider + ?Sized> DecisionProvider for Box<P> {
    fn decide(&mut self, agent: ObjectId, playground: &Playground) -> Result<Decision> {
        (**self).decide(agent, playground)
    }
}

/// A simple decision provider that always waits.
/// Useful for testing or as a fallback.
pub struct WaitProvider;

impl DecisionProvider for WaitProvider {
    fn decide(&mut self, _agent: ObjectId, _playground: &Playground) -> Result<Decision> {
        Ok(Decision::Wait)
    }
}

/// Seeded random policy.
///
/// Follows the agent's supplied path while it has one; otherwise wanders over
/// empty neighbouring cells as far as its budget allows. Rests when out of
/// stamina and occasionally sprints.
pub struct RandomWalkProvider {
    rng: StdRng,
    sprint_chance: f64,
}

impl RandomWalkProvider {
    pub const DEFAULT_SPRINT_CHANCE: f64 = 0.1;

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sprint_chance: Self::DEFAULT_SPRINT_CHANCE,
        }
    }

    /// Probability in `[0, 1]` of sprinting when sprint is available.
    pub fn with_sprint_chance(mut self, chance: f64) -> Self {
        self.sprint_chance = chance.clamp(0.0, 1.0);
        self
    }

    fn wants_to_sprint(&mut self) -> bool {
        self.rng.gen_bool(self.sprint_chance)
    }

    fn wander(
        &mut self,
        start: Coordinates,
        steps: u32,
        playground: &Playground,
    ) -> Vec<Coordinates> {
        let grid = playground.grid();
        let mut path = Vec::with_capacity(steps as usize);
        let mut position = start;

        for _ in 0..steps {
            let candidates: Vec<Coordinates> = position
                .neighbours()
                .filter(|&next| grid.is_empty_at(next).unwrap_or(false))
                .collect();
            let Some(&next) = candidates.choose(&mut self.rng) else {
                break;
            };
            path.push(next);
            position = next;
        }

        path
    }
}

impl DecisionProvider for RandomWalkProvider {
    fn decide(&mut self, agent: ObjectId, playground: &Playground) -> Result<Decision> {
        let Some(object) = playground.object(agent) else {
            return Ok(Decision::Wait);
        };
        let Some(state) = object.agent() else {
            return Ok(Decision::Wait);
        };
        let available = state.available_actions();

        let planned: Vec<Coordinates> = available
            .iter()
            .filter_map(|action| match action {
                AgentAction::Move { to } => Some(*to),
                _ => None,
            })
            .collect();
        if !planned.is_empty() {
            return Ok(Decision::Path(planned));
        }

        let steps = state.remaining_steps();
        if steps == 0 {
            let rest = AgentAction::Ability(AgentAbility::Rest);
            if state.stamina().is_exhausted() && available.contains(&rest) {
                return Ok(Decision::Ability(AgentAbility::Rest));
            }
            return Ok(Decision::Wait);
        }

        let sprint = AgentAction::Ability(AgentAbility::Sprint);
        if available.contains(&sprint) && self.wants_to_sprint() {
            return Ok(Decision::Ability(AgentAbility::Sprint));
        }

        let path = self.wander(object.coordinates(), steps, playground);
        if path.is_empty() {
            Ok(Decision::Wait)
        } else {
            Ok(Decision::Path(path))
        }
    }
}
