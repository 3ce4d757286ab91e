//! Reward shaping
//!
//! A single running reward, resampled every `cadence` ticks of the
//! controlled entity's age and read (unchanged) on every other tick.
//! Penalize a sample that saw a collision, reward one that didn't.

use serde::{Deserialize, Serialize};

use crate::settings::{RewardWindow, Settings};

/// Outcome of a cadence sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardSample {
    pub age: u64,
    pub collided: bool,
    pub running_reward: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardPolicy {
    cadence: u64,
    penalty: f64,
    bonus: f64,
    window: RewardWindow,
    running_reward: f64,
    /// Collision seen since the last sample
    latched: bool,
}

impl RewardPolicy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            cadence: settings.reward_cadence,
            penalty: settings.collision_penalty,
            bonus: settings.survival_bonus,
            window: settings.reward_window,
            running_reward: 0.0,
            latched: false,
        }
    }

    /// Current accumulator value
    pub fn running_reward(&self) -> f64 {
        self.running_reward
    }

    pub fn is_cadence_tick(&self, age: u64) -> bool {
        age % self.cadence == 0
    }

    /// Feed one tick's collision flag; resamples on cadence ticks
    ///
    /// Returns the sample when the accumulator changed this tick. The value
    /// passed to the learner is `running_reward()` either way.
    pub fn observe(&mut self, age: u64, collided: bool) -> Option<RewardSample> {
        self.latched |= collided;
        if !self.is_cadence_tick(age) {
            return None;
        }

        let hit = match self.window {
            RewardWindow::CurrentTick => collided,
            RewardWindow::SinceLastSample => self.latched,
        };
        self.latched = false;

        if hit {
            self.running_reward -= self.penalty;
        } else {
            self.running_reward += self.bonus;
        }

        Some(RewardSample {
            age,
            collided: hit,
            running_reward: self.running_reward,
        })
    }
}
