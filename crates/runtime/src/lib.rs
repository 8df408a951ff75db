//! Runtime orchestration for the grid simulation.
//!
//! This crate wires the decision provider abstraction, the turn executor, a
//! registry of independent playgrounds and snapshot repositories around
//! `playground-core`.
//!
//! Modules are organized by responsibility:
//! - [`executor`] runs turns and episodes on one playground
//! - [`api`] exposes the types downstream clients interact with
//! - [`registry`] keeps many playgrounds side by side
//! - [`repository`] persists snapshots in memory or on disk
//! - [`config`] loads runtime settings from the environment
pub mod api;
pub mod config;
pub mod executor;
pub mod registry;
pub mod repository;

pub use api::{
    Decision, DecisionProvider, ProviderKind, RandomWalkProvider, Result, RuntimeError,
    WaitProvider,
};
pub use config::RuntimeConfig;
pub use executor::{EpisodeSummary, TurnExecutor, TurnReport};
pub use registry::PlaygroundRegistry;
pub use repository::{
    FileSnapshotRepository, InMemorySnapshotRepo, RepositoryError, SnapshotFormat,
    SnapshotRepository,
};
