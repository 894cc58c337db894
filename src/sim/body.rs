//! Rigid bodies and the fixed-step integrator
//!
//! A body is either a point mass (no rotational degree of freedom) or a rod.
//! Forces accumulate between integration steps and are cleared by
//! [`RigidBody::integrate`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::consts::GRAVITY;
use crate::normalize_degrees;

/// A point or rod-shaped mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    mass: f32,
    /// Moment of inertia (0 = point mass)
    inertia: f32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Accumulated force for the current tick
    pub force: Vec2,
    /// Orientation in degrees, always in [0, 360)
    pub angle: f32,
    /// Angular velocity in degrees per tick
    pub angular_vel: f32,
    /// Accumulated torque for the current tick
    pub torque: f32,
}

impl RigidBody {
    /// Build a point mass at `pos`
    pub fn point_mass(mass: f32, pos: Vec2) -> Result<Self, SimError> {
        Self::with_inertia(mass, 0.0, pos, 0.0)
    }

    /// Build a rod of `length` centered at `pos`, inertia `m·L²/12`
    pub fn rod(mass: f32, length: f32, pos: Vec2, angle: f32) -> Result<Self, SimError> {
        if !length.is_finite() {
            return Err(SimError::NonFinite("rod length"));
        }
        if length <= 0.0 {
            return Err(SimError::NonPositiveLength(length));
        }
        Self::with_inertia(mass, mass * length * length / 12.0, pos, angle)
    }

    fn with_inertia(mass: f32, inertia: f32, pos: Vec2, angle: f32) -> Result<Self, SimError> {
        if !mass.is_finite() {
            return Err(SimError::NonFinite("mass"));
        }
        if mass <= 0.0 {
            return Err(SimError::NonPositiveMass(mass));
        }
        if !pos.is_finite() {
            return Err(SimError::NonFinite("position"));
        }
        if !angle.is_finite() {
            return Err(SimError::NonFinite("angle"));
        }
        Ok(Self {
            mass,
            inertia,
            pos,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            angle: normalize_degrees(angle),
            angular_vel: 0.0,
            torque: 0.0,
        })
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn inertia(&self) -> f32 {
        self.inertia
    }

    /// True for bodies without a rotational degree of freedom
    pub fn is_point_mass(&self) -> bool {
        self.inertia == 0.0
    }

    /// Add a force acting through the center of mass
    pub fn apply_force(&mut self, force: Vec2) {
        self.force += force;
    }

    /// Add a force acting at a world-space point, producing torque about the center
    pub fn apply_force_at(&mut self, force: Vec2, position: Vec2) {
        self.force += force;
        debug_assert!(!self.is_point_mass(), "point masses cannot take torque");
        if !self.is_point_mass() {
            self.torque += (position - self.pos).perp_dot(force);
        }
    }

    /// Pull the body down with `GRAVITY · m`
    pub fn apply_gravity(&mut self) {
        self.apply_force(Vec2::new(0.0, -GRAVITY * self.mass));
    }

    /// Advance one tick and clear the accumulators.
    ///
    /// Point masses keep their angular velocity untouched (no damping, no
    /// torque) but still turn by it, which is how the spider halves spin.
    pub fn integrate(&mut self, damping: f32) {
        let keep = 1.0 - damping;
        self.vel = self.vel * keep + self.force / self.mass;
        self.pos += self.vel;

        if !self.is_point_mass() {
            self.angular_vel = self.angular_vel * keep + self.torque / self.inertia;
        }
        self.angle = normalize_degrees(self.angle + self.angular_vel);

        self.force = Vec2::ZERO;
        self.torque = 0.0;
    }
}
