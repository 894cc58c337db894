//! Butterfly Knife - swing a tethered knife, cut the spider, beat the clock
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, tether, cut gesture, spider, outcome)
//! - `platform`: Clock abstraction feeding the countdown
//! - `settings`: JSON configuration (debug overlay, volumes, cue seed)
//! - `audio`: Cue selection from one-tick simulation events

pub mod audio;
pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Duration of one tick in seconds
    pub const TICK_SECS: f64 = 1.0 / TICK_RATE as f64;

    /// Velocity damping applied to every body, linear and angular
    pub const AIR_FRICTION: f32 = 0.01;
    /// Downward acceleration (per tick, scaled by mass)
    pub const GRAVITY: f32 = 0.1;

    /// Butterfly
    pub const BUTTERFLY_MASS: f32 = 1.0;
    pub const BUTTERFLY_START: (f32, f32) = (640.0, 360.0);
    pub const FLAP_FORCE: f32 = 6.0;
    pub const HORIZONTAL_FORCE: f32 = 0.15;

    /// Knife (rod). The rod used for inertia is shorter than the sprite.
    pub const KNIFE_MASS: f32 = 2.0;
    pub const KNIFE_LENGTH: f32 = 200.0;
    pub const KNIFE_LENGTH_FACTOR: f32 = 0.15;
    pub const KNIFE_HALF_LENGTH: f32 = KNIFE_LENGTH / 2.0;
    pub const KNIFE_START: (f32, f32) = (640.0, 260.0);
    pub const KNIFE_START_ANGLE: f32 = 270.0;
    /// Blade tip offset forward of the knife center (local space)
    pub const BLADE_TIP_OFFSET: f32 = -80.0;

    /// Tether spring constant (no rest length)
    pub const CONNECTION_STRENGTH: f32 = 0.03;

    /// Cut gesture window (degrees, degrees/tick, px/tick, ticks)
    pub const CUT_ANGLE_MIN: f32 = 100.0;
    pub const CUT_ANGLE_MAX: f32 = 120.0;
    pub const CUT_MAX_ANGULAR_VEL: f32 = -3.0;
    pub const CUT_MIN_TIP_SPEED: f32 = 7.0;
    pub const CUT_COOLDOWN_TICKS: u32 = 20;
    /// Ticks after a cut during which the cut hitbox is lethal
    pub const CUT_LETHAL_TICKS: u32 = 3;
    /// Cut hitbox: (x offset, y offset, w, h) relative to the blade tip
    pub const CUT_HITBOX: (f32, f32, f32, f32) = (0.0, -130.0, 160.0, 160.0);

    /// Butterfly hitbox relative to its position
    pub const BUTTERFLY_HITBOX: (f32, f32, f32, f32) = (-70.0, 0.0, 120.0, 130.0);

    /// Spider
    pub const SPIDER_START: (f32, f32) = (1000.0, 0.0);
    pub const SPIDER_SPEED: f32 = 2.0;
    pub const SPIDER_MIN_X: f32 = 130.0;
    pub const SPIDER_MAX_X: f32 = 1150.0;
    pub const SPIDER_HITBOX: (f32, f32, f32, f32) = (-65.0, 60.0, 130.0, 100.0);
    pub const SPIDER_HALF_MASS: f32 = 1.0;
    /// Half-body spawn offset from the spider (x is mirrored per side)
    pub const SPIDER_HALF_OFFSET: (f32, f32) = (33.0, 110.0);
    /// Half-body launch velocity (x is mirrored per side)
    pub const SPIDER_HALF_VELOCITY: (f32, f32) = (4.0, 8.0);
    /// Half-body spin in degrees per tick (left half spins positive)
    pub const SPIDER_HALF_SPIN: f32 = 2.0;

    /// Round length in seconds
    pub const ROUND_SECONDS: f32 = 20.0;

    /// Win autopilot keeps the butterfly between these x bounds
    pub const AUTOPILOT_MIN_X: f32 = 320.0;
    pub const AUTOPILOT_MAX_X: f32 = 960.0;
    /// Autopilot flaps every N ticks while below this height
    pub const AUTOPILOT_FLAP_PERIOD: u64 = 19;
    pub const AUTOPILOT_FLAP_CEILING: f32 = 360.0;

    /// Minimum ticks between audio cues
    pub const FLAP_CUE_COOLDOWN_TICKS: u32 = 5;
    pub const CUT_CUE_COOLDOWN_TICKS: u32 = 60;
}

/// Rotate a point given in a body's local frame about that body's center.
///
/// `angle` is in degrees, counter-clockwise, y-up.
#[inline]
pub fn rotate_point(center: Vec2, local: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.to_radians().sin_cos();
    Vec2::new(
        center.x + local.x * cos - local.y * sin,
        center.y + local.x * sin + local.y * cos,
    )
}

/// Wrap an angle in degrees into [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_point_identity() {
        let center = Vec2::new(10.0, 20.0);
        let p = rotate_point(center, Vec2::new(3.0, -4.0), 0.0);
        assert!((p - Vec2::new(13.0, 16.0)).length() < 1e-5);
    }

    #[test]
    fn test_rotate_point_quarter_turn() {
        // 90 degrees maps local +y onto world -x
        let p = rotate_point(Vec2::ZERO, Vec2::new(0.0, 100.0), 90.0);
        assert!((p.x + 100.0).abs() < 1e-3);
        assert!(p.y.abs() < 1e-3);
    }

    #[test]
    fn test_rotate_point_preserves_distance() {
        let center = Vec2::new(-5.0, 7.0);
        for angle in [0.0, 33.0, 115.0, 270.0, 359.0] {
            let p = rotate_point(center, Vec2::new(0.0, -80.0), angle);
            assert!(((p - center).length() - 80.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!((normalize_degrees(-10.0) - 350.0).abs() < 1e-4);
        assert!((normalize_degrees(725.0) - 5.0).abs() < 1e-4);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }
}
