//! Game state and core simulation types
//!
//! Everything the per-tick update reads or writes lives here. Behavior for
//! the knife and spider lives in their own modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::RigidBody;
use super::collision::{HitboxShape, Rect};
use super::error::SimError;
use crate::consts::*;

/// Top-level outcome of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Clock running, player in control
    #[default]
    Playing,
    /// Spider was cut
    Win,
    /// Butterfly touched a live spider
    Dead,
    /// Countdown reached zero
    TimeUp,
}

impl GameOutcome {
    /// Terminal outcomes never change again within a session
    pub fn is_terminal(self) -> bool {
        self != GameOutcome::Playing
    }

    /// On-screen message for terminal outcomes
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GameOutcome::Playing => None,
            GameOutcome::Win => Some("You Win!"),
            GameOutcome::Dead => Some("You touched the spider and are dead!"),
            GameOutcome::TimeUp => Some("Time's up!"),
        }
    }
}

/// The player-controlled butterfly (point mass)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Butterfly {
    pub body: RigidBody,
    pub ticks_since_flap: u32,
    pub hitbox: Rect,
    /// Overlapping a live spider this tick
    pub hit: bool,
    /// A flap started this tick
    pub flapped: bool,
    hitbox_shape: HitboxShape,
}

impl Butterfly {
    pub fn new(pos: Vec2) -> Result<Self, SimError> {
        let hitbox_shape = HitboxShape::new(BUTTERFLY_HITBOX)?;
        Ok(Self {
            body: RigidBody::point_mass(BUTTERFLY_MASS, pos)?,
            ticks_since_flap: 0,
            hitbox: hitbox_shape.at(pos),
            hit: false,
            flapped: false,
            hitbox_shape,
        })
    }

    /// Upward impulse for this tick
    pub fn flap(&mut self) {
        self.body.apply_force(Vec2::new(0.0, FLAP_FORCE));
        self.flapped = true;
    }

    /// Sideways push; `direction` is -1, 0 or 1
    pub fn push(&mut self, direction: i8) {
        if direction != 0 {
            self.body
                .apply_force(Vec2::new(f32::from(direction) * HORIZONTAL_FORCE, 0.0));
        }
    }

    /// Post-integration bookkeeping: flap timer and hitbox
    pub fn update(&mut self) {
        if self.flapped {
            self.ticks_since_flap = 0;
            self.flapped = false;
        } else {
            self.ticks_since_flap = self.ticks_since_flap.saturating_add(1);
        }
        self.hitbox = self.hitbox_shape.at(self.body.pos);
    }
}

/// The knife hanging from the butterfly (rod)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Knife {
    pub body: RigidBody,
    /// Pivot point the tether pulls on
    pub bottom: Vec2,
    pub blade_top: Vec2,
    pub previous_blade_top: Vec2,
    pub tip_speed: f32,
    /// True only on the tick a cut gesture completes
    pub cut: bool,
    pub cut_position: Option<Vec2>,
    pub cut_hitbox: Option<Rect>,
    pub ticks_since_cut: u32,
    pub(super) cut_shape: HitboxShape,
}

impl Knife {
    pub fn new(center: Vec2, angle: f32) -> Result<Self, SimError> {
        let body = RigidBody::rod(KNIFE_MASS, KNIFE_LENGTH * KNIFE_LENGTH_FACTOR, center, angle)?;
        let mut knife = Self {
            body,
            bottom: center,
            blade_top: center,
            previous_blade_top: center,
            tip_speed: 0.0,
            cut: false,
            cut_position: None,
            cut_hitbox: None,
            ticks_since_cut: 0,
            cut_shape: HitboxShape::new(CUT_HITBOX)?,
        };
        knife.reset_points();
        Ok(knife)
    }
}

/// Spider locomotion state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpiderState {
    /// Reserved for presentation; gameplay never enters it
    Idle,
    Walk,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// The two halves left behind by a cut spider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpiderRemains {
    pub left_half: RigidBody,
    pub right_half: RigidBody,
}

/// The walking target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spider {
    pub pos: Vec2,
    pub state: SpiderState,
    pub direction: Direction,
    pub ticks_in_state: u32,
    pub hitbox: Rect,
    /// Present once the spider is dead
    pub remains: Option<SpiderRemains>,
    pub(super) hitbox_shape: HitboxShape,
    /// Validated at construction so the death transition cannot fail
    pub(super) half_template: RigidBody,
}

impl Spider {
    pub fn new(pos: Vec2) -> Result<Self, SimError> {
        let hitbox_shape = HitboxShape::new(SPIDER_HITBOX)?;
        Ok(Self {
            pos,
            state: SpiderState::Walk,
            direction: Direction::Left,
            ticks_in_state: 0,
            hitbox: hitbox_shape.at(pos),
            remains: None,
            hitbox_shape,
            half_template: RigidBody::point_mass(SPIDER_HALF_MASS, pos)?,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.state != SpiderState::Dead
    }
}

/// One-tick event flags for the audio layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvents {
    /// Butterfly flapped and the flap cue is off cooldown
    pub flap_cue: bool,
    /// Knife cut and the cut cue is off cooldown
    pub cut_cue: bool,
    /// Spider died this tick
    pub spider_killed: bool,
    /// Outcome changed this tick
    pub outcome_changed: bool,
}

/// Ticks since each audio cue last fired
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub(super) struct CueTimers {
    pub since_flap: u32,
    pub since_cut: u32,
}

/// Complete session state (deterministic given inputs and clock readings)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub butterfly: Butterfly,
    pub knife: Knife,
    pub spider: Spider,
    pub outcome: GameOutcome,
    /// Whole seconds left, never negative
    pub remaining_time: f32,
    /// Clock reading at setup (seconds)
    pub start_time: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: TickEvents,
    pub(super) cues: CueTimers,
}

impl GameState {
    /// Set up a fresh session; `start_time` is the clock reading at setup
    pub fn new(start_time: f64) -> Result<Self, SimError> {
        if !start_time.is_finite() {
            return Err(SimError::NonFinite("start time"));
        }
        let butterfly = Butterfly::new(Vec2::from(BUTTERFLY_START))?;
        let mut knife = Knife::new(Vec2::from(KNIFE_START), KNIFE_START_ANGLE)?;
        knife.align_pivot_to(butterfly.body.pos);

        Ok(Self {
            butterfly,
            knife,
            spider: Spider::new(Vec2::from(SPIDER_START))?,
            outcome: GameOutcome::Playing,
            remaining_time: ROUND_SECONDS,
            start_time,
            time_ticks: 0,
            events: TickEvents::default(),
            cues: CueTimers::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session() {
        let state = GameState::new(5.0).unwrap();
        assert_eq!(state.outcome, GameOutcome::Playing);
        assert_eq!(state.remaining_time, ROUND_SECONDS);
        assert_eq!(state.spider.state, SpiderState::Walk);
        assert_eq!(state.spider.direction, Direction::Left);
        assert!(state.spider.remains.is_none());
        assert!(state.knife.cut_hitbox.is_none());
    }

    #[test]
    fn test_knife_pivot_starts_on_butterfly() {
        let state = GameState::new(0.0).unwrap();
        let gap = state.knife.bottom - state.butterfly.body.pos;
        assert!(gap.length() < 1e-3);
        // No spurious tip velocity at spawn
        assert_eq!(state.knife.previous_blade_top, state.knife.blade_top);
    }

    #[test]
    fn test_rejects_bad_start_time() {
        assert!(GameState::new(f64::NAN).is_err());
    }

    #[test]
    fn test_outcome_terminality_and_banner() {
        assert!(!GameOutcome::Playing.is_terminal());
        assert!(GameOutcome::Playing.banner().is_none());
        for outcome in [GameOutcome::Win, GameOutcome::Dead, GameOutcome::TimeUp] {
            assert!(outcome.is_terminal());
            assert!(outcome.banner().is_some());
        }
    }

    #[test]
    fn test_butterfly_flap_resets_timer() {
        let mut butterfly = Butterfly::new(Vec2::new(0.0, 0.0)).unwrap();
        butterfly.update();
        butterfly.update();
        assert_eq!(butterfly.ticks_since_flap, 2);
        butterfly.flap();
        assert_eq!(butterfly.body.force.y, FLAP_FORCE);
        butterfly.update();
        assert_eq!(butterfly.ticks_since_flap, 0);
        assert!(!butterfly.flapped);
    }

    #[test]
    fn test_butterfly_push_direction() {
        let mut butterfly = Butterfly::new(Vec2::ZERO).unwrap();
        butterfly.push(0);
        assert_eq!(butterfly.body.force, Vec2::ZERO);
        butterfly.push(-1);
        assert_eq!(butterfly.body.force.x, -HORIZONTAL_FORCE);
    }

    #[test]
    fn test_butterfly_hitbox_follows_body() {
        let mut butterfly = Butterfly::new(Vec2::new(100.0, 50.0)).unwrap();
        butterfly.body.pos = Vec2::new(200.0, 80.0);
        butterfly.update();
        assert_eq!(butterfly.hitbox.min, Vec2::new(130.0, 80.0));
        assert_eq!(butterfly.hitbox.max(), Vec2::new(250.0, 210.0));
    }
}
