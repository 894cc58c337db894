//! Knife pose, tether coupling and cut gesture recognition

use glam::Vec2;

use super::body::RigidBody;
use super::state::Knife;
use crate::consts::*;
use crate::rotate_point;

impl Knife {
    fn pivot_at_pose(&self) -> Vec2 {
        rotate_point(self.body.pos, Vec2::new(0.0, KNIFE_HALF_LENGTH), self.body.angle)
    }

    fn tip_at_pose(&self) -> Vec2 {
        rotate_point(self.body.pos, Vec2::new(0.0, BLADE_TIP_OFFSET), self.body.angle)
    }

    /// Recompute pivot and tip from the current pose, shifting last tick's tip
    /// into `previous_blade_top`
    pub fn update_points(&mut self) {
        self.bottom = self.pivot_at_pose();
        self.previous_blade_top = self.blade_top;
        self.blade_top = self.tip_at_pose();
    }

    /// Recompute points with no tip motion (spawn, teleport)
    pub fn reset_points(&mut self) {
        self.bottom = self.pivot_at_pose();
        self.blade_top = self.tip_at_pose();
        self.previous_blade_top = self.blade_top;
    }

    /// Translate the knife so its pivot sits on `target`
    pub fn align_pivot_to(&mut self, target: Vec2) {
        let shift = target - self.pivot_at_pose();
        self.body.pos += shift;
        self.reset_points();
    }

    /// True when the current pose and motion form a cutting swing
    pub fn in_cut_window(&self) -> bool {
        let angle = self.body.angle;
        angle > CUT_ANGLE_MIN
            && angle < CUT_ANGLE_MAX
            && self.body.angular_vel < CUT_MAX_ANGULAR_VEL
            && self.tip_speed > CUT_MIN_TIP_SPEED
            && self.ticks_since_cut > CUT_COOLDOWN_TICKS
    }

    /// Run the gesture detector for this tick. Returns true when a cut was
    /// recognized, which opens the cut hitbox at the blade tip.
    pub fn update_gesture(&mut self) -> bool {
        self.tip_speed = (self.blade_top - self.previous_blade_top).length();
        self.cut = self.in_cut_window();
        self.ticks_since_cut = self.ticks_since_cut.saturating_add(1);
        if self.cut {
            self.cut_position = Some(self.blade_top);
            self.cut_hitbox = Some(self.cut_shape.at(self.blade_top));
            self.ticks_since_cut = 0;
            log::debug!(
                "cut at ({:.1}, {:.1}), tip speed {:.2}",
                self.blade_top.x,
                self.blade_top.y,
                self.tip_speed
            );
        }
        self.cut
    }
}

/// Pull the butterfly toward the knife pivot and the pivot toward the
/// butterfly with equal and opposite forces. Returns the force applied to
/// the butterfly.
pub fn apply_tether(butterfly: &mut RigidBody, knife: &mut Knife) -> Vec2 {
    let pull = (knife.bottom - butterfly.pos) * CONNECTION_STRENGTH;
    butterfly.apply_force(pull);
    knife.body.apply_force_at(-pull, knife.bottom);
    pull
}
