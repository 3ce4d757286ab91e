//! Value table indexed by [state][action]
//!
//! Behaves like a zero-initialized dense array of
//! `state_space_size * action_count` entries, but only rows that have been
//! written are stored.

use std::collections::HashMap;

use super::encoder::StateIndex;

#[derive(Debug, Clone)]
pub struct QTable {
    state_space_size: u64,
    action_count: usize,
    rows: HashMap<StateIndex, Vec<f64>>,
    zero_row: Vec<f64>,
}

impl QTable {
    pub fn new(state_space_size: u64, action_count: usize) -> Self {
        assert!(action_count > 0, "need at least one action");
        Self {
            state_space_size,
            action_count,
            rows: HashMap::new(),
            zero_row: vec![0.0; action_count],
        }
    }

    pub fn state_space_size(&self) -> u64 {
        self.state_space_size
    }

    pub fn action_count(&self) -> usize {
        self.action_count
    }

    #[inline]
    fn check(&self, state: StateIndex, action: usize) {
        assert!(
            state < self.state_space_size,
            "state {state} out of range (size {})",
            self.state_space_size
        );
        assert!(
            action < self.action_count,
            "action {action} out of range (count {})",
            self.action_count
        );
    }

    /// Values of every action in `state`
    pub fn row(&self, state: StateIndex) -> &[f64] {
        self.check(state, 0);
        match self.rows.get(&state) {
            Some(row) => row,
            None => &self.zero_row,
        }
    }

    pub fn get(&self, state: StateIndex, action: usize) -> f64 {
        self.check(state, action);
        self.rows.get(&state).map_or(0.0, |row| row[action])
    }

    pub fn set(&mut self, state: StateIndex, action: usize, value: f64) {
        self.check(state, action);
        let count = self.action_count;
        self.rows.entry(state).or_insert_with(|| vec![0.0; count])[action] = value;
    }

    /// max_a Q[state][a]
    pub fn best_value(&self, state: StateIndex) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// argmax_a Q[state][a], lowest index on ties
    pub fn best_action(&self, state: StateIndex) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Number of states that have been written at least once
    pub fn touched_states(&self) -> usize {
        self.rows.len()
    }

    /// Number of entries holding a non-zero value
    pub fn nonzero_entries(&self) -> usize {
        self.rows
            .values()
            .map(|row| row.iter().filter(|v| **v != 0.0).count())
            .sum()
    }
}
