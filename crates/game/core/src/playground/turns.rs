//! Turn lifecycle: start, ordered agent actions, close, outcome.
//!
//! Every action validates completely before touching the grid, so a rejected
//! request leaves the playground exactly as it was.

use crate::grid::{Cell, GridError};
use crate::state::{
    AgentAbility, AgentAction, AgentState, Coordinates, ObjectId, ObjectKind, TurnPhase,
};

use super::{GameOutcome, Playground, PlaygroundError, PlaygroundEvent, TurnError};

impl Playground {
    /// Advances the turn counter and prepares every agent's action list.
    ///
    /// Returns the new turn number.
    pub fn on_start_turn_actions(&mut self) -> u64 {
        self.turn += 1;
        let (width, height) = (self.width(), self.height());

        for id in self.agent_ids() {
            if let Some(state) = self.agent_mut(id) {
                state.start_turn();
                state.refresh_available_actions(|c| c.x < width && c.y < height);
            }
        }

        self.events.push(PlaygroundEvent::TurnStarted { turn: self.turn });
        self.turn
    }

    /// Rebuilds one agent's action list from its remaining budget and path.
    pub fn refresh_actions(&mut self, agent: ObjectId) -> Result<(), PlaygroundError> {
        let state = self.require_agent(agent)?;
        if state.phase() == TurnPhase::TurnClosed {
            return Err(TurnError::ActionsNotPrepared {
                agent,
                phase: state.phase(),
            }
            .into());
        }

        let (width, height) = (self.width(), self.height());
        if let Some(state) = self.agent_mut(agent) {
            state.refresh_available_actions(|c| c.x < width && c.y < height);
        }
        Ok(())
    }

    /// Hero first (when present), then enemies by ascending
    /// `order_in_turn_queue`. Equal keys keep insertion order.
    pub fn ordered_agents_for_turn(&self) -> Vec<ObjectId> {
        let mut enemies: Vec<(u32, ObjectId)> = self
            .enemies
            .iter()
            .filter_map(|&id| self.agent(id).map(|state| (state.order_in_turn_queue(), id)))
            .collect();
        enemies.sort_by_key(|&(order, _)| order);

        self.hero
            .into_iter()
            .chain(enemies.into_iter().map(|(_, id)| id))
            .collect()
    }

    /// Replaces the externally computed path of an agent.
    ///
    /// If the agent is mid-turn its available actions are rebuilt.
    pub fn set_path_to_target(
        &mut self,
        agent: ObjectId,
        path: Vec<Coordinates>,
    ) -> Result<(), PlaygroundError> {
        let acting = self.require_agent(agent)?.can_act();
        if let Some(state) = self.agent_mut(agent) {
            state.set_path_to_target(path);
        }
        if acting {
            self.refresh_actions(agent)?;
        }
        Ok(())
    }

    pub fn set_turn_order(&mut self, enemy: ObjectId, order: u32) -> Result<(), PlaygroundError> {
        match self.kind_of(enemy) {
            None => return Err(TurnError::UnknownObject { id: enemy }.into()),
            Some(ObjectKind::Enemy) => {}
            Some(kind) => return Err(TurnError::NotAnEnemy { id: enemy, kind }.into()),
        }
        if let Some(state) = self.agent_mut(enemy) {
            state.set_order_in_turn_queue(order);
        }
        Ok(())
    }

    /// Walks `agent` along `steps`, one king move per step.
    ///
    /// The whole sequence is checked first: phase, bounds, adjacency,
    /// emptiness (cells the agent itself vacates count as free), then stamina
    /// and the per-turn step limit. Walking stops early at the step that
    /// reaches a new outcome. Returns the final position.
    pub fn apply_path(
        &mut self,
        agent: ObjectId,
        steps: &[Coordinates],
    ) -> Result<Coordinates, PlaygroundError> {
        let mut position = self.validate_path(agent, steps)?;

        for &step in steps {
            let settled = self.last_outcome;
            self.move_object_on_map(position, step)?;
            if let Some(state) = self.agent_mut(agent) {
                state.record_move(step);
            }
            position = step;
            if self.last_outcome.is_some() && self.last_outcome != settled {
                break;
            }
        }

        self.refresh_actions(agent)?;
        Ok(position)
    }

    /// Single-step convenience over [`Playground::apply_path`].
    pub fn move_agent(
        &mut self,
        agent: ObjectId,
        to: Coordinates,
    ) -> Result<Coordinates, PlaygroundError> {
        self.apply_path(agent, &[to])
    }

    pub fn use_ability(
        &mut self,
        agent: ObjectId,
        ability: AgentAbility,
    ) -> Result<(), PlaygroundError> {
        let state = self.acting_agent(agent)?;
        if !state
            .available_actions()
            .contains(&AgentAction::Ability(ability))
        {
            return Err(TurnError::AbilityUnavailable { agent, ability }.into());
        }

        if let Some(state) = self.agent_mut(agent) {
            state.use_ability(ability);
        }
        self.refresh_actions(agent)?;
        self.events
            .push(PlaygroundEvent::AbilityUsed { agent, ability });
        Ok(())
    }

    pub fn wait(&mut self, agent: ObjectId) -> Result<(), PlaygroundError> {
        self.acting_agent(agent)?;
        if let Some(state) = self.agent_mut(agent) {
            state.record_wait();
        }
        self.refresh_actions(agent)
    }

    /// Moves every agent to `TurnClosed` and drops sprinting.
    pub fn close_turn(&mut self) {
        for id in self.agent_ids() {
            if let Some(state) = self.agent_mut(id) {
                state.close_turn();
            }
        }
    }

    /// Terminal condition, if any. A catch takes precedence over an escape.
    pub fn outcome(&self) -> Option<GameOutcome> {
        let hero = self.hero?;
        let at = self.grid.object(hero)?.coordinates();

        let catcher = self
            .ordered_agents_for_turn()
            .into_iter()
            .filter(|&id| id != hero)
            .find(|&id| self.position_of(id).is_some_and(|c| c.is_adjacent(at)));
        if let Some(enemy) = catcher {
            return Some(GameOutcome::Caught { hero, enemy });
        }

        let exit = self.exit?;
        self.position_of(exit)
            .filter(|c| c.is_adjacent(at))
            .map(|_| GameOutcome::Escaped { hero, exit })
    }

    fn position_of(&self, id: ObjectId) -> Option<Coordinates> {
        self.grid.cell_of(id).map(Cell::coordinates)
    }

    /// Records an outcome event the first time a given outcome appears.
    pub(super) fn record_outcome(&mut self) {
        let outcome = self.outcome();
        if let Some(reached) = outcome.filter(|o| Some(*o) != self.last_outcome) {
            self.events.push(reached.as_event());
        }
        self.last_outcome = outcome;
    }

    fn acting_agent(&self, agent: ObjectId) -> Result<&AgentState, TurnError> {
        let state = self.require_agent(agent)?;
        if !state.can_act() {
            return Err(TurnError::ActionsNotPrepared {
                agent,
                phase: state.phase(),
            });
        }
        Ok(state)
    }

    fn validate_path(
        &self,
        agent: ObjectId,
        steps: &[Coordinates],
    ) -> Result<Coordinates, PlaygroundError> {
        let state = self.acting_agent(agent)?;
        let start = self
            .position_of(agent)
            .ok_or(TurnError::UnknownObject { id: agent })?;

        let mut position = start;
        let mut vacated = Vec::with_capacity(steps.len());
        for &step in steps {
            let occupant = self.grid.occupant(step)?;
            if !position.is_adjacent(step) {
                return Err(TurnError::IllegalStep {
                    agent,
                    from: position,
                    to: step,
                }
                .into());
            }
            if !occupant.kind().is_empty() && !vacated.contains(&step) {
                return Err(GridError::Occupied {
                    coordinates: step,
                    occupant: occupant.id(),
                    kind: occupant.kind(),
                }
                .into());
            }
            vacated.push(position);
            position = step;
        }

        state.check_move_budget(agent, steps.len() as u32)?;
        Ok(start)
    }
}
