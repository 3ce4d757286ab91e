//! Dodge RL - a tabular Q-learning agent learning to dodge obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, tick loop)
//! - `agent`: State encoding, Q-table, epsilon-greedy learner, reward shaping
//! - `platform`: Tick source / render sink seams for a presentation shell
//! - `settings`: Data-driven run configuration
//! - `summary`: End-of-run statistics

pub mod agent;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod summary;

pub use settings::{AgentParams, ConfigError, RewardWindow, Settings};
pub use sim::{Simulation, TickOutcome};
pub use summary::RunSummary;
