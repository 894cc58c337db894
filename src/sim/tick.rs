//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. Stages run in
//! a fixed order and data only flows forward within a tick:
//! input, knife points, forces, integration, cut gesture, collisions,
//! spider, outcome, audio cue flags.

use glam::Vec2;

use super::collision::{knife_hits_spider, spider_hits_butterfly};
use super::knife::apply_tether;
use super::state::{GameOutcome, GameState, SpiderState, TickEvents};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Start a flap this tick
    pub flap: bool,
    /// Horizontal push: -1 left, 0 none, 1 right
    pub horizontal: i8,
}

impl TickInput {
    pub fn new(flap: bool, horizontal: i8) -> Self {
        Self {
            flap,
            horizontal: horizontal.signum(),
        }
    }
}

/// Where the butterfly's command comes from this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// Real player input
    Player,
    /// Scripted victory flight
    WinAutopilot,
    /// Input is ignored
    Disabled,
}

impl InputSource {
    pub fn for_outcome(outcome: GameOutcome) -> Self {
        match outcome {
            GameOutcome::Playing => InputSource::Player,
            GameOutcome::Win => InputSource::WinAutopilot,
            GameOutcome::Dead | GameOutcome::TimeUp => InputSource::Disabled,
        }
    }

    /// Resolve the command for this tick
    pub fn command(self, real: &TickInput, butterfly_pos: Vec2, time_ticks: u64) -> Option<TickInput> {
        match self {
            InputSource::Player => Some(*real),
            InputSource::WinAutopilot => Some(autopilot_command(butterfly_pos, time_ticks)),
            InputSource::Disabled => None,
        }
    }
}

/// Drift back toward the middle of the screen and flap on a steady beat
fn autopilot_command(pos: Vec2, time_ticks: u64) -> TickInput {
    let horizontal = if pos.x > AUTOPILOT_MAX_X {
        -1
    } else if pos.x < AUTOPILOT_MIN_X {
        1
    } else {
        0
    };
    TickInput {
        flap: time_ticks.is_multiple_of(AUTOPILOT_FLAP_PERIOD) && pos.y < AUTOPILOT_FLAP_CEILING,
        horizontal,
    }
}

/// Advance the game state by one fixed step. `now` is the clock reading in
/// seconds, on the same clock as [`GameState::start_time`].
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    state.events = TickEvents::default();

    apply_input(state, input);

    state.knife.update_points();
    state.butterfly.body.apply_gravity();
    state.knife.body.apply_gravity();
    apply_tether(&mut state.butterfly.body, &mut state.knife);

    state.butterfly.body.integrate(AIR_FRICTION);
    state.knife.body.integrate(AIR_FRICTION);

    state.butterfly.update();
    state.knife.update_gesture();

    let knife_hit = knife_hits_spider(&state.knife, &state.spider);
    state.events.spider_killed = state.spider.update(knife_hit, AIR_FRICTION);
    state.butterfly.hit = spider_hits_butterfly(&state.spider, &state.butterfly.hitbox);

    update_outcome(state, now);
    update_cues(state);

    state.time_ticks += 1;
}

fn apply_input(state: &mut GameState, input: &TickInput) {
    let source = InputSource::for_outcome(state.outcome);
    let Some(command) = source.command(input, state.butterfly.body.pos, state.time_ticks) else {
        return;
    };
    if command.flap {
        state.butterfly.flap();
    }
    state.butterfly.push(command.horizontal.signum());
}

/// Outcome transitions in priority order, then the countdown. Both freeze
/// once a terminal outcome is reached.
fn update_outcome(state: &mut GameState, now: f64) {
    if state.outcome.is_terminal() {
        return;
    }

    let next = if state.spider.state == SpiderState::Dead {
        GameOutcome::Win
    } else if state.butterfly.hit {
        GameOutcome::Dead
    } else if state.remaining_time <= 0.0 {
        GameOutcome::TimeUp
    } else {
        GameOutcome::Playing
    };

    if next.is_terminal() {
        log::info!(
            "outcome {:?} after {} ticks, {}s left",
            next,
            state.time_ticks + 1,
            state.remaining_time
        );
        state.outcome = next;
        state.events.outcome_changed = true;
        return;
    }

    let elapsed = (now - state.start_time).floor().max(0.0) as f32;
    state.remaining_time = (ROUND_SECONDS - elapsed).max(0.0);
}

/// Raise throttled one-tick cue flags for the audio layer
fn update_cues(state: &mut GameState) {
    let cues = &mut state.cues;
    cues.since_flap = cues.since_flap.saturating_add(1);
    cues.since_cut = cues.since_cut.saturating_add(1);

    if state.butterfly.ticks_since_flap == 0 && cues.since_flap >= FLAP_CUE_COOLDOWN_TICKS {
        state.events.flap_cue = true;
        cues.since_flap = 0;
    }
    if state.knife.cut && cues.since_cut >= CUT_CUE_COOLDOWN_TICKS {
        state.events.cut_cue = true;
        cues.since_cut = 0;
    }
}
