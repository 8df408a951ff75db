//! Value types describing what occupies the map.
//!
//! Coordinates and identifiers, the closed set of occupant variants, and the
//! per-agent turn state layered on the hero and enemy variants.
mod agent;
mod common;
mod object;

pub use agent::{AgentAbility, AgentAction, AgentState, AgentStats, StaminaError, TurnPhase};
pub use common::{Coordinates, ObjectId, PlaygroundId, ResourceMeter};
pub use object::{MapObject, ObjectBody, ObjectKind, UnplacedObject};
