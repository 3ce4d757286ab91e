//! Learning subsystem
//!
//! - `encoder`: controlled-entity box to scalar state
//! - `q_table`: value estimates per (state, action)
//! - `qlearning`: epsilon-greedy policy and Bellman update
//! - `reward`: collision history to scalar reward

pub mod encoder;
pub mod q_table;
pub mod qlearning;
pub mod reward;

pub use encoder::{StateEncoder, StateIndex};
pub use q_table::QTable;
pub use qlearning::QLearningAgent;
pub use reward::{RewardPolicy, RewardSample};
