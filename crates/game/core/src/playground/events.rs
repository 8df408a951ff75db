//! State-change facts for an external notification layer.

use crate::state::{AgentAbility, Coordinates, ObjectId};

/// Something observable that happened on the playground.
///
/// Recorded in order and handed out by
/// [`Playground::drain_events`](super::Playground::drain_events).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaygroundEvent {
    TurnStarted {
        turn: u64,
    },
    AgentMoved {
        agent: ObjectId,
        from: Coordinates,
        to: Coordinates,
    },
    AbilityUsed {
        agent: ObjectId,
        ability: AgentAbility,
    },
    HeroReachedExit {
        hero: ObjectId,
        exit: ObjectId,
    },
    HeroCaught {
        hero: ObjectId,
        enemy: ObjectId,
    },
}

/// Terminal condition of an episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameOutcome {
    /// The hero stands next to the exit.
    Escaped { hero: ObjectId, exit: ObjectId },
    /// An enemy stands next to the hero.
    Caught { hero: ObjectId, enemy: ObjectId },
}

impl GameOutcome {
    pub fn as_event(self) -> PlaygroundEvent {
        match self {
            Self::Escaped { hero, exit } => PlaygroundEvent::HeroReachedExit { hero, exit },
            Self::Caught { hero, enemy } => PlaygroundEvent::HeroCaught { hero, enemy },
        }
    }
}
