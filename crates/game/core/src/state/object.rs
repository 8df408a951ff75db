//! Occupant kinds and the arena-resident map object.

use super::{AgentState, Coordinates, ObjectId};

/// Tag of the closed set of occupant variants.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ObjectKind {
    Empty,
    Block,
    BorderBlock,
    Exit,
    Hero,
    Enemy,
}

impl ObjectKind {
    /// Line-of-sight passes through every kind except blocks.
    pub const fn is_transparent(self) -> bool {
        !matches!(self, Self::Block | Self::BorderBlock)
    }

    /// Only empty cells can be entered or placed into.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub const fn is_agent(self) -> bool {
        matches!(self, Self::Hero | Self::Enemy)
    }
}

/// Variant payload of a map object.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectBody {
    Empty,
    Block,
    BorderBlock,
    Exit,
    Hero(AgentState),
    Enemy(AgentState),
}

impl ObjectBody {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Empty => ObjectKind::Empty,
            Self::Block => ObjectKind::Block,
            Self::BorderBlock => ObjectKind::BorderBlock,
            Self::Exit => ObjectKind::Exit,
            Self::Hero(_) => ObjectKind::Hero,
            Self::Enemy(_) => ObjectKind::Enemy,
        }
    }

    pub fn agent(&self) -> Option<&AgentState> {
        match self {
            Self::Hero(agent) | Self::Enemy(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn agent_mut(&mut self) -> Option<&mut AgentState> {
        match self {
            Self::Hero(agent) | Self::Enemy(agent) => Some(agent),
            _ => None,
        }
    }
}

/// An object that has not been bound to a cell yet.
///
/// Unplaced objects have no identifier and no coordinates; the grid assigns
/// both when [`Grid::place_object`](crate::grid::Grid::place_object) consumes
/// the value, so a half-placed object cannot exist. Empty and border occupants
/// are created by the grid itself and have no public constructor here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnplacedObject {
    body: ObjectBody,
}

impl UnplacedObject {
    pub fn block() -> Self {
        Self {
            body: ObjectBody::Block,
        }
    }

    pub fn exit() -> Self {
        Self {
            body: ObjectBody::Exit,
        }
    }

    pub fn hero(state: AgentState) -> Self {
        Self {
            body: ObjectBody::Hero(state),
        }
    }

    pub fn enemy(state: AgentState) -> Self {
        Self {
            body: ObjectBody::Enemy(state),
        }
    }

    pub fn kind(&self) -> ObjectKind {
        self.body.kind()
    }

    pub(crate) fn into_body(self) -> ObjectBody {
        self.body
    }
}

/// A placed occupant living in the grid arena.
///
/// `cell` is a plain index into the grid's cell array: a lookup relation, not
/// ownership. The grid updates `cell` and `coordinates` together whenever the
/// object moves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapObject {
    id: ObjectId,
    cell: usize,
    coordinates: Coordinates,
    body: ObjectBody,
}

impl MapObject {
    pub(crate) fn new(id: ObjectId, cell: usize, coordinates: Coordinates, body: ObjectBody) -> Self {
        Self {
            id,
            cell,
            coordinates,
            body,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.body.kind()
    }

    pub fn is_transparent(&self) -> bool {
        self.kind().is_transparent()
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// Index of the owning cell in the grid's row-major cell array.
    pub fn cell_index(&self) -> usize {
        self.cell
    }

    pub fn body(&self) -> &ObjectBody {
        &self.body
    }

    pub fn agent(&self) -> Option<&AgentState> {
        self.body.agent()
    }

    pub(crate) fn agent_mut(&mut self) -> Option<&mut AgentState> {
        self.body.agent_mut()
    }

    pub(crate) fn rebind(&mut self, cell: usize, coordinates: Coordinates) {
        self.cell = cell;
        self.coordinates = coordinates;
    }
}
