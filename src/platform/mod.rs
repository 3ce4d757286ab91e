//! Presentation shell seams
//!
//! The simulation never depends on a window or a clock directly. A shell
//! supplies tick events and pacing (`TickSource`) and optionally displays
//! frames (`RenderSink`). Frames are write-only: nothing rendered is read
//! back by the simulation.

use std::time::{Duration, Instant};

use crate::sim::{BoundingBox, Color, Obstacle};

/// Discrete events drained at the start of a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// Window closed or process asked to stop
    pub quit_requested: bool,
    /// Escape key pressed
    pub escape_pressed: bool,
}

impl TickEvents {
    pub fn should_stop(&self) -> bool {
        self.quit_requested || self.escape_pressed
    }
}

/// Supplies ticks to the simulation loop
pub trait TickSource {
    /// Drain pending input events
    fn poll(&mut self) -> TickEvents;

    /// Block until the next tick boundary
    fn wait_for_next_tick(&mut self);
}

/// Everything a sink needs to draw one frame
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub tick: u64,
    pub player: &'a BoundingBox,
    pub player_color: Color,
    pub obstacles: &'a [Obstacle],
    pub obstacle_color: Color,
    pub running_reward: f64,
}

/// Displays frames for a human observer
pub trait RenderSink {
    fn render(&mut self, frame: &Frame<'_>);
}

/// Renders nothing
#[derive(Debug, Default)]
pub struct NullSink {
    pub frames: u64,
}

impl RenderSink for NullSink {
    fn render(&mut self, _frame: &Frame<'_>) {
        self.frames += 1;
    }
}

/// Tick source without a window
///
/// Stops after `max_ticks` (if set) and, in realtime mode, sleeps to hold
/// the target tick rate.
#[derive(Debug)]
pub struct HeadlessShell {
    max_ticks: Option<u64>,
    ticks: u64,
    tick_duration: Duration,
    realtime: bool,
    next_deadline: Option<Instant>,
}

impl HeadlessShell {
    pub fn new(max_ticks: Option<u64>, tick_duration: Duration, realtime: bool) -> Self {
        Self {
            max_ticks,
            ticks: 0,
            tick_duration,
            realtime,
            next_deadline: None,
        }
    }

    /// Run as fast as possible for exactly `ticks` ticks
    pub fn fixed(ticks: u64) -> Self {
        Self::new(Some(ticks), Duration::ZERO, false)
    }
}

impl TickSource for HeadlessShell {
    fn poll(&mut self) -> TickEvents {
        let done = self.max_ticks.is_some_and(|max| self.ticks >= max);
        self.ticks += 1;
        TickEvents {
            quit_requested: done,
            escape_pressed: false,
        }
    }

    fn wait_for_next_tick(&mut self) {
        if !self.realtime {
            return;
        }
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now) + self.tick_duration;
        if deadline > now {
            std::thread::sleep(deadline - now);
            self.next_deadline = Some(deadline);
        } else {
            // Fell behind; don't try to catch up
            self.next_deadline = Some(now);
        }
    }
}
