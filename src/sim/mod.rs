//! Deterministic simulation module
//!
//! Arena entities and the per-tick orchestration. This module must stay
//! deterministic for a given seed:
//! - Seeded RNG only, one stream per consumer
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies beyond the `platform` traits

pub mod geometry;
pub mod spawner;
pub mod state;
pub mod tick;

pub use geometry::{BoundingBox, overlaps};
pub use spawner::Spawner;
pub use state::{
    ACTION_COUNT, Action, Color, ControlledEntity, OBSTACLE_COLOR, Obstacle, ObstacleSet,
    PLAYER_COLOR,
};
pub use tick::{RngState, Simulation, TickOutcome};
