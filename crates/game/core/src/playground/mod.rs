//! One simulation instance: the grid plus references to its notable objects
//! and the turn counter.
//!
//! All mutation goes through this type. Callers must serialize operations on
//! one playground; independent playgrounds share nothing.

mod error;
mod events;
mod turns;

pub use error::{PlaygroundError, TurnError};
pub use events::{GameOutcome, PlaygroundEvent};

use crate::builder::{ConfigurationError, validate_dimensions};
use crate::grid::{Cell, CellView, Grid, GridError, MapPart};
use crate::state::{
    AgentState, Coordinates, MapObject, ObjectId, ObjectKind, PlaygroundId, UnplacedObject,
};
use crate::visibility::visible_cells;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playground {
    id: PlaygroundId,
    turn: u64,
    grid: Grid,
    hero: Option<ObjectId>,
    exit: Option<ObjectId>,
    blocks: Vec<ObjectId>,
    enemies: Vec<ObjectId>,
    events: Vec<PlaygroundEvent>,
    last_outcome: Option<GameOutcome>,
}

impl Playground {
    /// Creates an empty playground (border only) at turn 0.
    pub fn new(id: PlaygroundId, width: u32, height: u32) -> Result<Self, ConfigurationError> {
        validate_dimensions(width, height)?;
        Ok(Self::from_parts(
            id,
            0,
            Grid::new(width, height),
            None,
            None,
            Vec::new(),
            Vec::new(),
        ))
    }

    /// Assembles a playground from already consistent parts.
    pub(crate) fn from_parts(
        id: PlaygroundId,
        turn: u64,
        grid: Grid,
        hero: Option<ObjectId>,
        exit: Option<ObjectId>,
        blocks: Vec<ObjectId>,
        enemies: Vec<ObjectId>,
    ) -> Self {
        let mut playground = Self {
            id,
            turn,
            grid,
            hero,
            exit,
            blocks,
            enemies,
            events: Vec::new(),
            last_outcome: None,
        };
        playground.last_outcome = playground.outcome();
        playground
    }

    pub fn id(&self) -> PlaygroundId {
        self.id
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn hero(&self) -> Option<ObjectId> {
        self.hero
    }

    pub fn exit(&self) -> Option<ObjectId> {
        self.exit
    }

    pub fn blocks(&self) -> &[ObjectId] {
        &self.blocks
    }

    pub fn enemies(&self) -> &[ObjectId] {
        &self.enemies
    }

    pub fn object(&self, id: ObjectId) -> Option<&MapObject> {
        self.grid.object(id)
    }

    /// Turn state of a hero or enemy.
    pub fn agent(&self, id: ObjectId) -> Option<&AgentState> {
        self.grid.object(id).and_then(MapObject::agent)
    }

    pub fn hero_state(&self) -> Option<&AgentState> {
        self.hero.and_then(|id| self.agent(id))
    }

    /// Bounds-checked cell lookup.
    pub fn cell(&self, coordinates: Coordinates) -> Result<&Cell, GridError> {
        self.grid.cell(coordinates)
    }

    /// Square excerpt of the map around `center`, clamped to the grid.
    pub fn cut_map_part(&self, center: Coordinates, radius: u32) -> Result<MapPart, GridError> {
        self.grid.cut_out_part_of_the_map(center, radius)
    }

    /// Occupancy of every cell, row-major.
    pub fn occupancy(&self) -> Vec<CellView> {
        self.grid.cell_views().collect()
    }

    pub fn events(&self) -> &[PlaygroundEvent] {
        &self.events
    }

    /// Hands recorded events to the caller, oldest first.
    pub fn drain_events(&mut self) -> Vec<PlaygroundEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn place_hero(
        &mut self,
        hero: AgentState,
        coordinates: Coordinates,
    ) -> Result<ObjectId, PlaygroundError> {
        if let Some(existing) = self.hero {
            return Err(ConfigurationError::HeroAlreadyPlaced { existing }.into());
        }
        let id = self
            .grid
            .place_object(UnplacedObject::hero(hero), coordinates)?;
        self.hero = Some(id);
        Ok(id)
    }

    pub fn place_enemy(
        &mut self,
        enemy: AgentState,
        coordinates: Coordinates,
    ) -> Result<ObjectId, PlaygroundError> {
        let id = self
            .grid
            .place_object(UnplacedObject::enemy(enemy), coordinates)?;
        self.enemies.push(id);
        Ok(id)
    }

    pub fn place_exit(&mut self, coordinates: Coordinates) -> Result<ObjectId, PlaygroundError> {
        if let Some(existing) = self.exit {
            return Err(ConfigurationError::ExitAlreadyPlaced { existing }.into());
        }
        let id = self.grid.place_object(UnplacedObject::exit(), coordinates)?;
        self.exit = Some(id);
        Ok(id)
    }

    pub fn add_block(&mut self, coordinates: Coordinates) -> Result<ObjectId, PlaygroundError> {
        let id = self
            .grid
            .place_object(UnplacedObject::block(), coordinates)?;
        self.blocks.push(id);
        Ok(id)
    }

    /// Moves whatever occupies `from` into the empty cell `to`.
    ///
    /// If the mover is an agent its field of view is recomputed, an
    /// [`PlaygroundEvent::AgentMoved`] is recorded, and so is the outcome
    /// the move leads to, if it is a new one.
    pub fn move_object_on_map(
        &mut self,
        from: Coordinates,
        to: Coordinates,
    ) -> Result<&Cell, PlaygroundError> {
        let mover = self.grid.move_object(from, to)?.occupant();

        if self.agent(mover).is_some() {
            self.look_around(mover)?;
            self.events.push(PlaygroundEvent::AgentMoved {
                agent: mover,
                from,
                to,
            });
            self.record_outcome();
        }

        Ok(self.grid.cell(to)?)
    }

    /// Recomputes the visible cells of one agent.
    pub fn look_around(&mut self, agent: ObjectId) -> Result<(), PlaygroundError> {
        let object = self
            .grid
            .object(agent)
            .ok_or(TurnError::UnknownObject { id: agent })?;
        if object.agent().is_none() {
            return Err(TurnError::NotAnAgent {
                id: agent,
                kind: object.kind(),
            }
            .into());
        }
        self.refresh_visibility(agent);
        Ok(())
    }

    /// Recomputes the visible cells of the hero and every enemy.
    pub fn look_around_everyone(&mut self) {
        for agent in self.agent_ids() {
            self.refresh_visibility(agent);
        }
    }

    /// Recomputes the field of view of `id`; a no-op for non-agents.
    fn refresh_visibility(&mut self, id: ObjectId) {
        let Some(object) = self.grid.object(id) else {
            return;
        };
        let Some(state) = object.agent() else {
            return;
        };
        let cells = visible_cells(&self.grid, object.coordinates(), state.sight_range());

        if let Some(state) = self.agent_mut(id) {
            state.set_visible_cells(cells);
        }
    }

    /// Hero first, then enemies in insertion order.
    pub(crate) fn agent_ids(&self) -> Vec<ObjectId> {
        self.hero
            .into_iter()
            .chain(self.enemies.iter().copied())
            .collect()
    }

    /// Looks up an agent or explains why `id` is not one.
    pub(crate) fn require_agent(&self, id: ObjectId) -> Result<&AgentState, TurnError> {
        let object = self
            .grid
            .object(id)
            .ok_or(TurnError::UnknownObject { id })?;
        object.agent().ok_or(TurnError::NotAnAgent {
            id,
            kind: object.kind(),
        })
    }

    pub(crate) fn agent_mut(&mut self, id: ObjectId) -> Option<&mut AgentState> {
        self.grid.object_mut(id).and_then(MapObject::agent_mut)
    }

    pub(crate) fn kind_of(&self, id: ObjectId) -> Option<ObjectKind> {
        self.grid.object(id).map(MapObject::kind)
    }
}
