//! Run statistics
//!
//! Counters gathered while the simulation runs, reported once at shutdown.

use serde::{Deserialize, Serialize};

/// Counters updated by the orchestrator every tick
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    /// Ticks on which the entity overlapped an obstacle
    pub colliding_ticks: u64,
    pub reward_samples: u64,
    /// Reward samples that counted as a collision
    pub collision_samples: u64,
    pub obstacles_expired: u64,
    pub peak_obstacles: usize,
}

impl RunStats {
    pub fn record_obstacles(&mut self, live: usize) {
        self.peak_obstacles = self.peak_obstacles.max(live);
    }

    /// Fraction of reward samples that were penalized
    pub fn collision_rate(&self) -> f64 {
        if self.reward_samples == 0 {
            0.0
        } else {
            self.collision_samples as f64 / self.reward_samples as f64
        }
    }
}

/// End-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub seed: u64,
    pub ticks: u64,
    pub reward_samples: u64,
    pub collision_samples: u64,
    pub colliding_ticks: u64,
    pub collision_rate: f64,
    pub running_reward: f64,
    pub exploration_rate: f64,
    pub live_obstacles: usize,
    pub peak_obstacles: usize,
    pub obstacles_spawned: u64,
    pub obstacles_expired: u64,
    pub touched_states: usize,
    pub nonzero_q_entries: usize,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn log(&self) {
        log::info!(
            "Run finished after {} ticks: reward {}, {}/{} samples penalized, epsilon {:.6}",
            self.ticks,
            self.running_reward,
            self.collision_samples,
            self.reward_samples,
            self.exploration_rate
        );
        log::info!(
            "Obstacles: {} live, {} peak, {} spawned, {} expired",
            self.live_obstacles,
            self.peak_obstacles,
            self.obstacles_spawned,
            self.obstacles_expired
        );
        log::info!(
            "Q-table: {} states touched, {} non-zero entries",
            self.touched_states,
            self.nonzero_q_entries
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_rate() {
        let mut stats = RunStats::default();
        assert_eq!(stats.collision_rate(), 0.0);
        stats.reward_samples = 4;
        stats.collision_samples = 1;
        assert_eq!(stats.collision_rate(), 0.25);
    }

    #[test]
    fn test_peak_obstacles_only_grows() {
        let mut stats = RunStats::default();
        stats.record_obstacles(5);
        stats.record_obstacles(3);
        assert_eq!(stats.peak_obstacles, 5);
    }
}
