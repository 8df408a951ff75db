//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the core and the repositories so clients can bubble
//! them up with consistent context.
use std::fmt;

use playground_core::{PlaygroundError, PlaygroundId, SnapshotError};
use thiserror::Error;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no playground registered as {id}")]
    UnknownPlayground { id: PlaygroundId },

    #[error("{id} is already registered")]
    DuplicatePlayground { id: PlaygroundId },

    #[error("no snapshot stored for {id}")]
    SnapshotNotFound { id: PlaygroundId },

    #[error(transparent)]
    Playground(#[from] PlaygroundError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Which side a decision provider plays for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ProviderKind {
    Hero,
    Enemy,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProviderKind::Hero => "hero",
            ProviderKind::Enemy => "enemy",
        };
        write!(f, "{}", label)
    }
}
