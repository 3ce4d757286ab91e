//! Tabular Q-learning with epsilon-greedy exploration
//!
//! Update rule:
//! Q(s,a) <- Q(s,a) + α[r + γ·max_a' Q(s',a') - Q(s,a)]
//!
//! There is no terminal state: every update bootstraps from `next_state`.

use rand::Rng;

use super::encoder::StateIndex;
use super::q_table::QTable;
use crate::settings::AgentParams;

#[derive(Debug, Clone)]
pub struct QLearningAgent {
    table: QTable,
    learning_rate: f64,
    discount_factor: f64,
    exploration_rate: f64,
    exploration_decay: f64,
    updates: u64,
}

impl QLearningAgent {
    pub fn new(state_space_size: u64, action_count: usize, params: AgentParams) -> Self {
        Self {
            table: QTable::new(state_space_size, action_count),
            learning_rate: params.learning_rate,
            discount_factor: params.discount_factor,
            exploration_rate: params.exploration_rate,
            exploration_decay: params.exploration_decay,
            updates: 0,
        }
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    pub fn exploration_rate(&self) -> f64 {
        self.exploration_rate
    }

    /// Number of `update` calls so far
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Epsilon-greedy action for `state`
    ///
    /// Explores with probability ε, otherwise takes the argmax of the row
    /// (lowest index on ties). Does not decay ε.
    pub fn choose_action<R: Rng + ?Sized>(&self, state: StateIndex, rng: &mut R) -> usize {
        if rng.random::<f64>() < self.exploration_rate {
            rng.random_range(0..self.table.action_count())
        } else {
            self.table.best_action(state)
        }
    }

    /// One-step Q-learning update, then ε <- ε·λ
    ///
    /// ε decays on every call, whether or not the reward changed since the
    /// previous call.
    pub fn update(&mut self, state: StateIndex, action: usize, reward: f64, next_state: StateIndex) {
        let best_next = self.table.best_value(next_state);
        let target = reward + self.discount_factor * best_next;
        let current = self.table.get(state, action);
        let error = target - current;
        self.table.set(state, action, current + self.learning_rate * error);

        self.exploration_rate *= self.exploration_decay;
        self.updates += 1;
    }
}
