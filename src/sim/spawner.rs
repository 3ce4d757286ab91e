//! Periodic obstacle generator
//!
//! Models the wall-clock spawn timer as a tick countdown so runs stay
//! deterministic for a given seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::BoundingBox;
use super::state::Obstacle;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Fire every this many ticks
    interval_ticks: u64,
    /// Ticks since the last fire
    elapsed: u64,
    arena_width: i32,
    arena_height: i32,
    obstacle_width: i32,
    obstacle_height: i32,
    margin_min: i32,
    margin_max: i32,
    min_speed: i32,
    max_speed: i32,
    next_id: u32,
    /// Total obstacles created
    pub spawned: u64,
}

impl Spawner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            interval_ticks: settings.spawn_interval_ticks(),
            elapsed: 0,
            arena_width: settings.arena_width,
            arena_height: settings.arena_height,
            obstacle_width: settings.obstacle_width,
            obstacle_height: settings.obstacle_height,
            margin_min: settings.spawn_margin_min,
            margin_max: settings.spawn_margin_max,
            min_speed: settings.min_speed,
            max_speed: settings.max_speed,
            next_id: 1,
            spawned: 0,
        }
    }

    pub fn interval_ticks(&self) -> u64 {
        self.interval_ticks
    }

    /// Advance the timer by one tick, returning a new obstacle when it fires
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Obstacle> {
        self.elapsed += 1;
        if self.elapsed < self.interval_ticks {
            return None;
        }
        self.elapsed = 0;
        Some(self.spawn(rng))
    }

    /// Create one obstacle right of the arena with random height and speed
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Obstacle {
        let cx = rng.random_range(
            self.arena_width + self.margin_min..=self.arena_width + self.margin_max,
        );
        let cy = rng.random_range(0..=self.arena_height);
        let speed = rng.random_range(self.min_speed..=self.max_speed);

        let id = self.next_id;
        self.next_id += 1;
        self.spawned += 1;

        let bounds = BoundingBox::from_center(cx, cy, self.obstacle_width, self.obstacle_height);
        log::debug!("Spawned obstacle {} at ({}, {}) speed {}", id, cx, cy, speed);
        Obstacle::new(id, bounds, speed)
    }
}
