//! Deterministic turn-based grid simulation.
//!
//! `playground-core` defines the rules of one simulation instance: a bordered
//! grid of cells, the closed set of occupants (empty, block, border, exit,
//! hero, enemy), agent field of view and per-turn budgets. All mutation of a
//! playground flows through [`Playground`]; [`PlaygroundFactory`] builds
//! validated, fully populated instances.
//!
//! The crate is synchronous and performs no I/O.
pub mod builder;
pub mod config;
pub mod error;
pub mod grid;
pub mod playground;
pub mod rng;
pub mod snapshot;
pub mod state;
pub mod visibility;

pub use builder::{ConfigurationError, PlaygroundBuilder, PlaygroundFactory};
pub use config::{PlaygroundConfig, PlaygroundParams};
pub use error::{ErrorKind, ErrorSeverity, GameError};
pub use grid::{Cell, CellView, Grid, GridError, MapPart};
pub use playground::{GameOutcome, Playground, PlaygroundError, PlaygroundEvent, TurnError};
pub use rng::PlacementRng;
pub use snapshot::{ObjectSnapshot, PlaygroundSnapshot, SnapshotError};
pub use state::{
    AgentAbility, AgentAction, AgentState, AgentStats, Coordinates, MapObject, ObjectBody,
    ObjectId, ObjectKind, PlaygroundId, ResourceMeter, StaminaError, TurnPhase, UnplacedObject,
};
pub use visibility::{has_line_of_sight, visible_cells};
