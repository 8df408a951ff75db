//! Grid access and occupancy errors.

use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::state::{Coordinates, ObjectId, ObjectKind};

/// Errors raised by coordinate lookups and the two grid mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// Coordinates lie outside `[0, width) × [0, height)`.
    #[error("coordinates {coordinates} are outside the {width}x{height} grid")]
    OutOfBounds {
        coordinates: Coordinates,
        width: u32,
        height: u32,
    },

    /// Target cell already holds a non-empty occupant.
    #[error("cell {coordinates} is already occupied by {kind} {occupant}")]
    Occupied {
        coordinates: Coordinates,
        occupant: ObjectId,
        kind: ObjectKind,
    },

    /// Source cell of a move holds only an empty occupant.
    #[error("cell {coordinates} holds nothing to move")]
    NothingToMove { coordinates: Coordinates },

    /// Border blocks never move.
    #[error("{kind} at {coordinates} cannot be moved")]
    Immovable {
        coordinates: Coordinates,
        kind: ObjectKind,
    },

    /// Every object id has been handed out.
    #[error("object ids are exhausted")]
    IdsExhausted,

    /// A cell references an object the arena does not hold.
    #[error("object {id} referenced by cell {coordinates} is missing from the arena")]
    MissingObject {
        id: ObjectId,
        coordinates: Coordinates,
    },
}

impl GameError for GridError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds { .. } => ErrorSeverity::Validation,
            Self::Occupied { .. } | Self::NothingToMove { .. } | Self::Immovable { .. } => {
                ErrorSeverity::Recoverable
            }
            Self::MissingObject { .. } | Self::IdsExhausted => ErrorSeverity::Internal,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::OutOfBounds { .. } => ErrorKind::Bounds,
            Self::Occupied { .. }
            | Self::NothingToMove { .. }
            | Self::Immovable { .. }
            | Self::MissingObject { .. }
            | Self::IdsExhausted => ErrorKind::Occupancy,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "GRID_OUT_OF_BOUNDS",
            Self::Occupied { .. } => "GRID_CELL_OCCUPIED",
            Self::NothingToMove { .. } => "GRID_NOTHING_TO_MOVE",
            Self::Immovable { .. } => "GRID_IMMOVABLE",
            Self::MissingObject { .. } => "GRID_MISSING_OBJECT",
            Self::IdsExhausted => "GRID_IDS_EXHAUSTED",
        }
    }
}
