//! Save/restore representation of a playground.
//!
//! Border blocks are never persisted: they are regenerated from the grid
//! dimensions, and their ids follow from those dimensions alone. Everything
//! else (interior occupants with their full agent turn state, the id
//! allocator and the turn counter) is captured so that a restored playground
//! is indistinguishable from the one it was taken from.
use std::collections::BTreeSet;

use crate::builder::validate_dimensions;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::grid::Grid;
use crate::playground::Playground;
use crate::state::{Coordinates, ObjectBody, ObjectId, ObjectKind, PlaygroundId};

/// One persisted interior occupant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectSnapshot {
    pub id: ObjectId,
    pub coordinates: Coordinates,
    pub body: ObjectBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaygroundSnapshot {
    pub id: PlaygroundId,
    pub turn: u64,
    pub width: u32,
    pub height: u32,
    /// Next id the grid will hand out.
    pub next_object_id: u32,
    /// Every non-border cell's occupant, row-major.
    pub cells: Vec<ObjectSnapshot>,
    pub hero: Option<ObjectId>,
    pub exit: Option<ObjectId>,
    pub blocks: Vec<ObjectId>,
    pub enemies: Vec<ObjectId>,
}

/// Inconsistent snapshot input. Nothing is constructed when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot dimensions {width}x{height} are outside the supported range")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("snapshot cell {coordinates} lies outside the grid")]
    CellOutOfBounds { coordinates: Coordinates },

    #[error("snapshot cell {coordinates} is on the border, which is not persisted")]
    BorderCell { coordinates: Coordinates },

    #[error("snapshot cell {coordinates} holds a border block")]
    UnexpectedBorderBlock { coordinates: Coordinates },

    #[error("snapshot cell {coordinates} appears more than once")]
    DuplicateCell { coordinates: Coordinates },

    #[error("snapshot object {id} appears more than once")]
    DuplicateObject { id: ObjectId },

    #[error("snapshot has no occupant for cell {coordinates}")]
    MissingCell { coordinates: Coordinates },

    #[error("reference {id} does not point to a {expected}")]
    DanglingReference { id: ObjectId, expected: ObjectKind },

    #[error("{kind} {id} is on the map but not referenced")]
    UnreferencedObject { id: ObjectId, kind: ObjectKind },
}

impl GameError for SnapshotError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Snapshot
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "SNAPSHOT_INVALID_DIMENSIONS",
            Self::CellOutOfBounds { .. } => "SNAPSHOT_CELL_OUT_OF_BOUNDS",
            Self::BorderCell { .. } => "SNAPSHOT_BORDER_CELL",
            Self::UnexpectedBorderBlock { .. } => "SNAPSHOT_UNEXPECTED_BORDER_BLOCK",
            Self::DuplicateCell { .. } => "SNAPSHOT_DUPLICATE_CELL",
            Self::DuplicateObject { .. } => "SNAPSHOT_DUPLICATE_OBJECT",
            Self::MissingCell { .. } => "SNAPSHOT_MISSING_CELL",
            Self::DanglingReference { .. } => "SNAPSHOT_DANGLING_REFERENCE",
            Self::UnreferencedObject { .. } => "SNAPSHOT_UNREFERENCED_OBJECT",
        }
    }
}

impl Playground {
    /// Captures everything needed to rebuild this playground.
    ///
    /// Pending events are not part of the snapshot.
    pub fn snapshot(&self) -> PlaygroundSnapshot {
        PlaygroundSnapshot {
            id: self.id(),
            turn: self.turn(),
            width: self.width(),
            height: self.height(),
            next_object_id: self.grid().next_object_id(),
            cells: self.grid().interior_objects(),
            hero: self.hero(),
            exit: self.exit(),
            blocks: self.blocks().to_vec(),
            enemies: self.enemies().to_vec(),
        }
    }

    /// Rebuilds a playground, regenerating the border from the dimensions.
    pub fn from_snapshot(snapshot: PlaygroundSnapshot) -> Result<Self, SnapshotError> {
        let PlaygroundSnapshot {
            id,
            turn,
            width,
            height,
            next_object_id,
            cells,
            hero,
            exit,
            blocks,
            enemies,
        } = snapshot;

        validate_dimensions(width, height)
            .map_err(|_| SnapshotError::InvalidDimensions { width, height })?;
        let grid = Grid::restore(width, height, next_object_id, cells)?;

        let references = hero
            .into_iter()
            .map(|id| (id, ObjectKind::Hero))
            .chain(exit.into_iter().map(|id| (id, ObjectKind::Exit)))
            .chain(blocks.iter().map(|&id| (id, ObjectKind::Block)))
            .chain(enemies.iter().map(|&id| (id, ObjectKind::Enemy)));

        let mut referenced = BTreeSet::new();
        for (id, expected) in references {
            let valid = grid
                .object(id)
                .is_some_and(|object| object.kind() == expected);
            if !valid || !referenced.insert(id) {
                return Err(SnapshotError::DanglingReference { id, expected });
            }
        }

        if let Some(stray) = grid
            .cell_views()
            .filter(|view| !view.kind.is_empty() && view.kind != ObjectKind::BorderBlock)
            .find(|view| !referenced.contains(&view.object))
        {
            return Err(SnapshotError::UnreferencedObject {
                id: stray.object,
                kind: stray.kind,
            });
        }

        Ok(Self::from_parts(id, turn, grid, hero, exit, blocks, enemies))
    }
}
