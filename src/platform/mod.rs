//! Platform abstraction layer
//!
//! The simulation never reads time on its own; a [`Clock`] supplies one
//! reading per tick for the countdown.

use std::time::Instant;

use crate::consts::TICK_SECS;

/// Source of monotonic "now" readings in seconds
pub trait Clock {
    fn now_secs(&mut self) -> f64;
}

/// Wall-clock time since construction
#[derive(Debug, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_secs(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Simulated time: every reading advances exactly one tick
#[derive(Debug, Clone, Default)]
pub struct FixedStepClock {
    ticks: u64,
}

impl FixedStepClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks handed out so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Clock for FixedStepClock {
    fn now_secs(&mut self) -> f64 {
        self.ticks += 1;
        self.ticks as f64 * TICK_SECS
    }
}
