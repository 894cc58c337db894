//! Read-only view of the simulation for the renderer
//!
//! Built after each tick. Holds copies, so nothing a renderer does with it
//! can reach back into [`GameState`].

use glam::Vec2;
use serde::Serialize;

use super::collision::Rect;
use super::state::{Direction, GameOutcome, GameState, SpiderState};

/// Slash animation plays for this many ticks after a cut
const SLASH_TICKS: u32 = 18;
const SLASH_TICKS_PER_FRAME: u32 = 3;
/// Butterfly shows its flap sprite for this many ticks
const FLAP_SPRITE_TICKS: u32 = 5;
const WALK_TICKS_PER_FRAME: u32 = 10;
const WALK_FRAMES: u32 = 4;
const CORPSE_FADE_TICKS: f32 = 60.0;
const LEG_HEIGHT: f32 = 236.0;
const LEG_SHRINK_PER_TICK: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyPose {
    pub pos: Vec2,
    pub angle: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ButterflyView {
    pub pose: BodyPose,
    /// Wings-down sprite right after a flap
    pub flapping: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct KnifeView {
    pub pose: BodyPose,
    pub bottom: Vec2,
    pub blade_top: Vec2,
    pub tip_speed: f32,
    /// Slash effect anchor and 1-based frame while the effect plays
    pub slash: Option<(Vec2, u32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpiderView {
    pub pos: Vec2,
    pub state: SpiderState,
    pub direction: Direction,
    pub ticks_in_state: u32,
    /// Leg animation frame (0..4) while walking
    pub walk_frame: u32,
    /// Halves fade out after death (1 = opaque)
    pub corpse_alpha: f32,
    /// Legs shrink into the ground after death
    pub leg_height: f32,
    pub halves: Option<(BodyPose, BodyPose)>,
}

/// Hitboxes for the debug overlay
#[derive(Debug, Clone, Serialize)]
pub struct DebugHitboxes {
    pub butterfly: Rect,
    pub spider: Rect,
    pub cut: Option<Rect>,
}

/// Everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub tick: u64,
    pub butterfly: ButterflyView,
    pub knife: KnifeView,
    pub spider: SpiderView,
    pub outcome: GameOutcome,
    pub remaining_time: f32,
    /// Only present with the debug setting on
    pub debug: Option<DebugHitboxes>,
}

impl Snapshot {
    pub fn capture(state: &GameState, debug: bool) -> Self {
        let butterfly = &state.butterfly;
        let knife = &state.knife;
        let spider = &state.spider;

        let slash = knife
            .cut_position
            .filter(|_| knife.ticks_since_cut < SLASH_TICKS)
            .map(|pos| (pos, knife.ticks_since_cut / SLASH_TICKS_PER_FRAME + 1));

        let dead_ticks = spider.ticks_in_state as f32;
        let (walk_frame, corpse_alpha, leg_height) = match spider.state {
            SpiderState::Walk => (
                (spider.ticks_in_state / WALK_TICKS_PER_FRAME) % WALK_FRAMES,
                1.0,
                LEG_HEIGHT,
            ),
            SpiderState::Dead => (
                0,
                (1.0 - dead_ticks / CORPSE_FADE_TICKS).max(0.0),
                (LEG_HEIGHT - dead_ticks * LEG_SHRINK_PER_TICK).max(0.0),
            ),
            SpiderState::Idle => (0, 1.0, LEG_HEIGHT),
        };

        Self {
            tick: state.time_ticks,
            butterfly: ButterflyView {
                pose: BodyPose {
                    pos: butterfly.body.pos,
                    angle: butterfly.body.angle,
                },
                flapping: butterfly.ticks_since_flap < FLAP_SPRITE_TICKS,
            },
            knife: KnifeView {
                pose: BodyPose {
                    pos: knife.body.pos,
                    angle: knife.body.angle,
                },
                bottom: knife.bottom,
                blade_top: knife.blade_top,
                tip_speed: knife.tip_speed,
                slash,
            },
            spider: SpiderView {
                pos: spider.pos,
                state: spider.state,
                direction: spider.direction,
                ticks_in_state: spider.ticks_in_state,
                walk_frame,
                corpse_alpha,
                leg_height,
                halves: spider.remains.as_ref().map(|r| {
                    (
                        BodyPose {
                            pos: r.left_half.pos,
                            angle: r.left_half.angle,
                        },
                        BodyPose {
                            pos: r.right_half.pos,
                            angle: r.right_half.angle,
                        },
                    )
                }),
            },
            outcome: state.outcome,
            remaining_time: state.remaining_time,
            debug: debug.then(|| DebugHitboxes {
                butterfly: butterfly.hitbox,
                spider: spider.hitbox,
                cut: knife.cut_hitbox.filter(|_| knife.ticks_since_cut < SLASH_TICKS),
            }),
        }
    }

    /// Countdown text, two digits
    pub fn timer_text(&self) -> String {
        format!("{:02}", self.remaining_time.max(0.0) as u32)
    }

    pub fn banner(&self) -> Option<&'static str> {
        self.outcome.banner()
    }
}
