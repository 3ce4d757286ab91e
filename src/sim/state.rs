//! Arena entities
//!
//! The controlled entity (player) and the obstacles it has to avoid.
//! Both are plain structs owning a bounding box; the orchestrator in
//! `tick` composes them.

use serde::{Deserialize, Serialize};

use super::geometry::{BoundingBox, overlaps};

/// Number of discrete actions
pub const ACTION_COUNT: usize = 4;

/// RGB color used by render sinks
pub type Color = (u8, u8, u8);

pub const PLAYER_COLOR: Color = (255, 255, 255);
pub const OBSTACLE_COLOR: Color = (255, 0, 0);

/// A movement command for the controlled entity (no "stay" action)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Map an agent action index (0..ACTION_COUNT) to an action
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Translation for this action with the given step size
    pub fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Action::Up => (0, -step),
            Action::Down => (0, step),
            Action::Left => (-step, 0),
            Action::Right => (step, 0),
        }
    }
}

/// The agent-controlled entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlledEntity {
    pub bounds: BoundingBox,
    /// Ticks lived; drives the reward cadence
    pub age: u64,
    step: i32,
}

impl ControlledEntity {
    /// Create the entity with its top-left corner at the arena origin
    pub fn new(width: i32, height: i32, step: i32) -> Self {
        Self {
            bounds: BoundingBox::from_size(0, 0, width, height),
            age: 0,
            step,
        }
    }

    /// Translate by one step in the action's direction (may leave the arena)
    pub fn apply_action(&mut self, action: Action) {
        let (dx, dy) = action.delta(self.step);
        self.bounds.translate(dx, dy);
    }

    /// Pull the box back inside [0, W] x [0, H]
    pub fn clamp_to_arena(&mut self, width: i32, height: i32) {
        self.bounds.clamp_within(width, height);
    }

    pub fn tick(&mut self) {
        self.age += 1;
    }
}

/// A leftward-moving obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub bounds: BoundingBox,
    /// Units moved left per tick, always > 0
    pub speed: i32,
}

impl Obstacle {
    pub fn new(id: u32, bounds: BoundingBox, speed: i32) -> Self {
        debug_assert!(speed > 0, "obstacles must move left");
        Self { id, bounds, speed }
    }

    /// Move left by `speed`; returns true once the right edge has left the arena
    pub fn advance(&mut self) -> bool {
        self.bounds.translate(-self.speed, 0);
        self.is_expired()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.bounds.right < 0
    }
}

/// Live obstacles, kept in spawn order
///
/// There is no cap on the number of live obstacles: they are only removed
/// after leaving the arena, so the set grows with the spawn rate times the
/// slowest crossing time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleSet {
    obstacles: Vec<Obstacle>,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Advance every obstacle and drop the expired ones; returns how many were removed
    pub fn advance_all(&mut self) -> usize {
        let before = self.obstacles.len();
        self.obstacles.retain_mut(|o| {
            let expired = o.advance();
            if expired {
                log::trace!("Obstacle {} left the arena", o.id);
            }
            !expired
        });
        before - self.obstacles.len()
    }

    /// True if any obstacle overlaps the given box
    pub fn any_overlap(&self, bounds: &BoundingBox) -> bool {
        self.obstacles.iter().any(|o| overlaps(&o.bounds, bounds))
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn as_slice(&self) -> &[Obstacle] {
        &self.obstacles
    }
}
