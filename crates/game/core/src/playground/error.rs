//! Playground-level errors.

use crate::builder::ConfigurationError;
use crate::error::{ErrorKind, ErrorSeverity, GameError};
use crate::grid::GridError;
use crate::snapshot::SnapshotError;
use crate::state::{AgentAbility, Coordinates, ObjectId, ObjectKind, StaminaError, TurnPhase};

/// Per-turn request errors not covered by grid or stamina checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("object {id} is not on this playground")]
    UnknownObject { id: ObjectId },

    #[error("object {id} is a {kind}, not an agent")]
    NotAnAgent { id: ObjectId, kind: ObjectKind },

    #[error("object {id} is a {kind}, not an enemy")]
    NotAnEnemy { id: ObjectId, kind: ObjectKind },

    #[error("agent {agent} cannot act while {phase}")]
    ActionsNotPrepared { agent: ObjectId, phase: TurnPhase },

    #[error("agent {agent} cannot use {ability} now")]
    AbilityUnavailable {
        agent: ObjectId,
        ability: AgentAbility,
    },

    #[error("agent {agent} cannot step from {from} to {to}")]
    IllegalStep {
        agent: ObjectId,
        from: Coordinates,
        to: Coordinates,
    },
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownObject { .. } | Self::NotAnAgent { .. } | Self::NotAnEnemy { .. } => {
                ErrorSeverity::Validation
            }
            Self::ActionsNotPrepared { .. }
            | Self::AbilityUnavailable { .. }
            | Self::IllegalStep { .. } => ErrorSeverity::Recoverable,
        }
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::Turn
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownObject { .. } => "TURN_UNKNOWN_OBJECT",
            Self::NotAnAgent { .. } => "TURN_NOT_AN_AGENT",
            Self::NotAnEnemy { .. } => "TURN_NOT_AN_ENEMY",
            Self::ActionsNotPrepared { .. } => "TURN_ACTIONS_NOT_PREPARED",
            Self::AbilityUnavailable { .. } => "TURN_ABILITY_UNAVAILABLE",
            Self::IllegalStep { .. } => "TURN_ILLEGAL_STEP",
        }
    }
}

/// Every error a playground operation can return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlaygroundError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Stamina(#[from] StaminaError),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl PlaygroundError {
    fn inner(&self) -> &dyn GameError {
        match self {
            Self::Configuration(err) => err,
            Self::Grid(err) => err,
            Self::Stamina(err) => err,
            Self::Turn(err) => err,
            Self::Snapshot(err) => err,
        }
    }
}

impl GameError for PlaygroundError {
    fn severity(&self) -> ErrorSeverity {
        self.inner().severity()
    }

    fn kind(&self) -> ErrorKind {
        self.inner().kind()
    }

    fn error_code(&self) -> &'static str {
        self.inner().error_code()
    }
}
