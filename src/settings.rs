//! Run configuration
//!
//! Every tunable constant of the arena, spawner, reward policy and agent
//! lives here. Loaded from a JSON file; fields that are missing take the
//! defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agent::StateEncoder;

/// Which collisions the reward sample looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RewardWindow {
    /// Only the collision flag of the sampling tick
    #[default]
    CurrentTick,
    /// Any collision since the previous sample
    SinceLastSample,
}

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Learning hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentParams {
    /// α, in (0, 1]
    pub learning_rate: f64,
    /// γ, in [0, 1]
    pub discount_factor: f64,
    /// Initial ε, in [0, 1]
    pub exploration_rate: f64,
    /// Multiplicative ε decay per update, in (0, 1]
    pub exploration_decay: f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.9,
            exploration_rate: 1.0,
            exploration_decay: 0.99,
        }
    }
}

/// Full run configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub arena_width: i32,
    pub arena_height: i32,

    // === Controlled entity ===
    pub player_width: i32,
    pub player_height: i32,
    /// Distance moved per action
    pub move_step: i32,

    // === Obstacles ===
    pub obstacle_width: i32,
    pub obstacle_height: i32,
    /// Smallest spawn center x, as an offset past the right edge of the arena
    pub spawn_margin_min: i32,
    /// Largest spawn center x, as an offset past the right edge of the arena
    pub spawn_margin_max: i32,
    /// Inclusive speed range in units per tick
    pub min_speed: i32,
    pub max_speed: i32,
    /// Wall-clock period of the spawn timer
    pub spawn_interval_ms: u32,

    // === Timing ===
    /// Target simulation rate (ticks per second)
    pub tick_rate: u32,

    // === Reward ===
    /// Reward is resampled when age is a multiple of this
    pub reward_cadence: u64,
    pub collision_penalty: f64,
    pub survival_bonus: f64,
    pub reward_window: RewardWindow,

    // === Agent ===
    pub agent: AgentParams,

    /// RNG seed for the spawner and exploration
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            arena_width: 800,
            arena_height: 600,

            player_width: 75,
            player_height: 25,
            move_step: 10,

            obstacle_width: 20,
            obstacle_height: 10,
            spawn_margin_min: 20,
            spawn_margin_max: 100,
            min_speed: 5,
            max_speed: 20,
            spawn_interval_ms: 250,

            tick_rate: 30,

            reward_cadence: 30,
            collision_penalty: 10.0,
            survival_bonus: 5.0,
            reward_window: RewardWindow::CurrentTick,

            agent: AgentParams::default(),

            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Check every parameter against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.arena_width <= 0 || self.arena_height <= 0 {
            return Err(ConfigError::invalid("arena", "width and height must be positive"));
        }
        if StateEncoder::checked_state_space_size(self.arena_width, self.arena_height).is_none() {
            return Err(ConfigError::invalid(
                "arena",
                format!(
                    "{}x{} overflows the state index space",
                    self.arena_width, self.arena_height
                ),
            ));
        }
        if self.player_width <= 0 || self.player_height <= 0 {
            return Err(ConfigError::invalid("player", "width and height must be positive"));
        }
        if self.player_width > self.arena_width || self.player_height > self.arena_height {
            return Err(ConfigError::invalid("player", "entity does not fit in the arena"));
        }
        if self.move_step <= 0 || self.move_step > self.arena_width.max(self.arena_height) {
            return Err(ConfigError::invalid("move_step", "must be positive and fit in the arena"));
        }
        if self.obstacle_width <= 0 || self.obstacle_height <= 0 {
            return Err(ConfigError::invalid("obstacle", "width and height must be positive"));
        }
        if self.spawn_margin_min <= self.obstacle_width / 2 {
            return Err(ConfigError::invalid(
                "spawn_margin_min",
                format!(
                    "must exceed half the obstacle width ({}) so obstacles spawn right of the arena",
                    self.obstacle_width / 2
                ),
            ));
        }
        if self.spawn_margin_min > self.spawn_margin_max {
            return Err(ConfigError::invalid("spawn_margin", "min exceeds max"));
        }
        let spawn_right = self
            .arena_width
            .checked_add(self.spawn_margin_max)
            .and_then(|x| x.checked_add(self.obstacle_width));
        let spawn_bottom = self.arena_height.checked_add(self.obstacle_height);
        if spawn_right.is_none() || spawn_bottom.is_none() {
            return Err(ConfigError::invalid(
                "spawn_margin_max",
                "spawn position overflows arena coordinates",
            ));
        }
        if self.min_speed <= 0 || self.min_speed > self.max_speed || self.max_speed > self.arena_width {
            return Err(ConfigError::invalid(
                "speed",
                format!(
                    "need 0 < min <= max <= arena width, got {}..={}",
                    self.min_speed, self.max_speed
                ),
            ));
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::invalid("tick_rate", "must be positive"));
        }
        if self.reward_cadence == 0 {
            return Err(ConfigError::invalid("reward_cadence", "must be positive"));
        }

        let a = &self.agent;
        if !(a.learning_rate > 0.0 && a.learning_rate <= 1.0) {
            return Err(ConfigError::invalid("learning_rate", "must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&a.discount_factor) {
            return Err(ConfigError::invalid("discount_factor", "must be in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&a.exploration_rate) {
            return Err(ConfigError::invalid("exploration_rate", "must be in [0, 1]"));
        }
        if !(a.exploration_decay > 0.0 && a.exploration_decay <= 1.0) {
            return Err(ConfigError::invalid("exploration_decay", "must be in (0, 1]"));
        }

        Ok(())
    }

    /// Spawn timer period converted to ticks (never zero)
    pub fn spawn_interval_ticks(&self) -> u64 {
        let ticks = u64::from(self.spawn_interval_ms) * u64::from(self.tick_rate) / 1000;
        ticks.max(1)
    }

    /// Duration of one tick
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.spawn_interval_ticks(), 7);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let json = r#"{ "seed": 42, "agent": { "learning_rate": 0.5 } }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.seed, 42);
        assert_eq!(settings.agent.learning_rate, 0.5);
        assert_eq!(settings.agent.discount_factor, 0.9);
        assert_eq!(settings.arena_width, 800);
        assert_eq!(settings.reward_window, RewardWindow::CurrentTick);
    }

    #[test]
    fn test_reward_window_from_json() {
        let json = r#"{ "reward_window": "since_last_sample" }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.reward_window, RewardWindow::SinceLastSample);
    }

    #[test]
    fn test_rejects_bad_learning_rate() {
        let mut settings = Settings::default();
        settings.agent.learning_rate = 0.0;
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "learning_rate", .. })
        ));
    }

    #[test]
    fn test_rejects_inverted_speed_range() {
        let settings = Settings {
            min_speed: 20,
            max_speed: 5,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_player() {
        let settings = Settings {
            player_width: 900,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_arena_too_large() {
        let settings = Settings {
            arena_width: 70_000,
            arena_height: 70_000,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "arena", .. })
        ));
    }

    #[test]
    fn test_largest_square_arena_is_accepted() {
        // (65535 + 1)^4 = 2^64 overflows, 65534 fits
        let fits = Settings {
            arena_width: 65_534,
            arena_height: 65_534,
            ..Default::default()
        };
        assert!(fits.validate().is_ok());
        let overflows = Settings {
            arena_width: 65_535,
            arena_height: 65_535,
            ..Default::default()
        };
        assert!(overflows.validate().is_err());
    }

    #[test]
    fn test_rejects_spawn_overflowing_coordinates() {
        let settings = Settings {
            arena_width: 1_000,
            spawn_margin_max: i32::MAX - 10,
            ..Default::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::Invalid { field: "spawn_margin_max", .. })
        ));
    }

    #[test]
    fn test_rejects_steps_larger_than_arena() {
        let step = Settings {
            move_step: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            step.validate(),
            Err(ConfigError::Invalid { field: "move_step", .. })
        ));
        let speed = Settings {
            max_speed: i32::MAX,
            ..Default::default()
        };
        assert!(matches!(
            speed.validate(),
            Err(ConfigError::Invalid { field: "speed", .. })
        ));
    }

    #[test]
    fn test_rejects_spawn_inside_arena() {
        let negative = Settings {
            spawn_margin_min: -50,
            ..Default::default()
        };
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::Invalid { field: "spawn_margin_min", .. })
        ));

        // Center 10 past the edge with a 20-wide obstacle puts the left edge on the boundary
        let touching = Settings {
            spawn_margin_min: 10,
            obstacle_width: 20,
            ..Default::default()
        };
        assert!(touching.validate().is_err());

        let clear = Settings {
            spawn_margin_min: 11,
            obstacle_width: 20,
            ..Default::default()
        };
        assert!(clear.validate().is_ok());
    }

    #[test]
    fn test_spawn_interval_never_zero() {
        let settings = Settings {
            spawn_interval_ms: 1,
            tick_rate: 30,
            ..Default::default()
        };
        assert_eq!(settings.spawn_interval_ticks(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/dodge-rl.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
