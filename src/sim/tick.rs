//! Fixed-step simulation tick
//!
//! Owns every piece of run state (entity, obstacles, spawner, agent,
//! reward accumulator, RNG streams) and advances it one tick at a time.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawner::Spawner;
use super::state::{
    ACTION_COUNT, Action, ControlledEntity, OBSTACLE_COLOR, ObstacleSet, PLAYER_COLOR,
};
use crate::agent::{QLearningAgent, RewardPolicy, RewardSample, StateEncoder, StateIndex};
use crate::platform::{Frame, RenderSink, TickSource};
use crate::settings::Settings;
use crate::summary::{RunStats, RunSummary};

/// RNG stream used for obstacle spawning
const SPAWN_STREAM: u64 = 1;
/// RNG stream used for exploration
const EXPLORE_STREAM: u64 = 2;

/// Seed plus stream id for one RNG
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        let mut rng = Pcg32::seed_from_u64(self.seed);
        // One PCG stream per consumer
        if self.stream != 0 {
            rng = Pcg32::new(rand::RngCore::next_u64(&mut rng), self.stream);
        }
        rng
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub state: StateIndex,
    pub action: Action,
    pub next_state: StateIndex,
    pub collided: bool,
    /// Reward passed to the learner (stale unless `sample` is set)
    pub reward: f64,
    pub sample: Option<RewardSample>,
    pub spawned: bool,
    pub expired: usize,
}

/// Complete run state
pub struct Simulation {
    settings: Settings,
    pub player: ControlledEntity,
    pub obstacles: ObstacleSet,
    spawner: Spawner,
    encoder: StateEncoder,
    agent: QLearningAgent,
    reward: RewardPolicy,
    spawn_rng: Pcg32,
    explore_rng: Pcg32,
    stats: RunStats,
}

impl Simulation {
    /// Build a run from validated settings
    pub fn new(settings: Settings) -> Self {
        let encoder = StateEncoder::new(settings.arena_width, settings.arena_height);
        let agent = QLearningAgent::new(encoder.state_space_size(), ACTION_COUNT, settings.agent);

        log::info!(
            "Arena {}x{}, {} states x {} actions, spawn every {} ticks",
            settings.arena_width,
            settings.arena_height,
            encoder.state_space_size(),
            ACTION_COUNT,
            settings.spawn_interval_ticks()
        );

        Self {
            player: ControlledEntity::new(
                settings.player_width,
                settings.player_height,
                settings.move_step,
            ),
            obstacles: ObstacleSet::new(),
            spawner: Spawner::new(&settings),
            encoder,
            agent,
            reward: RewardPolicy::new(&settings),
            spawn_rng: RngState::new(settings.seed, SPAWN_STREAM).to_rng(),
            explore_rng: RngState::new(settings.seed, EXPLORE_STREAM).to_rng(),
            stats: RunStats::default(),
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn encoder(&self) -> &StateEncoder {
        &self.encoder
    }

    pub fn running_reward(&self) -> f64 {
        self.reward.running_reward()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Advance everything by one tick
    pub fn tick(&mut self) -> TickOutcome {
        let (w, h) = (self.settings.arena_width, self.settings.arena_height);

        // Observe and act
        let state = self.encoder.encode(&self.player.bounds);
        let action_index = self.agent.choose_action(state, &mut self.explore_rng);
        // Agent and table are both sized by ACTION_COUNT
        let action = Action::ALL[action_index];
        self.player.apply_action(action);
        // Clamp before encoding so next_state stays in range
        self.player.clamp_to_arena(w, h);
        self.player.tick();

        // World
        let spawned = match self.spawner.advance(&mut self.spawn_rng) {
            Some(obstacle) => {
                self.obstacles.add(obstacle);
                true
            }
            None => false,
        };
        let expired = self.obstacles.advance_all();
        let collided = self.obstacles.any_overlap(&self.player.bounds);

        // Learn
        let next_state = self.encoder.encode(&self.player.bounds);
        let sample = self.reward.observe(self.player.age, collided);
        if let Some(s) = sample {
            if s.collided {
                log::info!("Collision");
            }
            log::info!("Reward: {}", s.running_reward);
        }
        let reward = self.reward.running_reward();
        self.agent.update(state, action.index(), reward, next_state);

        self.player.clamp_to_arena(w, h);

        self.stats.ticks += 1;
        self.stats.obstacles_expired += expired as u64;
        self.stats.record_obstacles(self.obstacles.len());
        if collided {
            self.stats.colliding_ticks += 1;
        }
        if let Some(s) = sample {
            self.stats.reward_samples += 1;
            if s.collided {
                self.stats.collision_samples += 1;
            }
        }

        TickOutcome {
            state,
            action,
            next_state,
            collided,
            reward,
            sample,
            spawned,
            expired,
        }
    }

    /// Run until the tick source asks to stop
    pub fn run<T, R>(&mut self, source: &mut T, sink: &mut R) -> RunSummary
    where
        T: TickSource + ?Sized,
        R: RenderSink + ?Sized,
    {
        loop {
            let events = source.poll();
            if events.should_stop() {
                log::debug!("Stop requested after {} ticks", self.stats.ticks);
                break;
            }

            self.tick();

            sink.render(&Frame {
                tick: self.stats.ticks,
                player: &self.player.bounds,
                player_color: PLAYER_COLOR,
                obstacles: self.obstacles.as_slice(),
                obstacle_color: OBSTACLE_COLOR,
                running_reward: self.reward.running_reward(),
            });

            source.wait_for_next_tick();
        }

        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            seed: self.settings.seed,
            ticks: self.stats.ticks,
            reward_samples: self.stats.reward_samples,
            collision_samples: self.stats.collision_samples,
            colliding_ticks: self.stats.colliding_ticks,
            collision_rate: self.stats.collision_rate(),
            running_reward: self.reward.running_reward(),
            exploration_rate: self.agent.exploration_rate(),
            live_obstacles: self.obstacles.len(),
            peak_obstacles: self.stats.peak_obstacles,
            obstacles_spawned: self.spawner.spawned,
            obstacles_expired: self.stats.obstacles_expired,
            touched_states: self.agent.table().touched_states(),
            nonzero_q_entries: self.agent.table().nonzero_entries(),
        }
    }
}
