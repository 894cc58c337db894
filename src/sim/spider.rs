//! Spider locomotion and death

use glam::Vec2;

use super::body::RigidBody;
use super::state::{Direction, Spider, SpiderRemains, SpiderState};
use crate::consts::*;

impl Spider {
    /// Advance the spider one tick. `hit` is the knife hit registered this
    /// tick. Returns true on the tick the spider dies.
    pub fn update(&mut self, hit: bool, damping: f32) -> bool {
        self.hitbox = self.hitbox_shape.at(self.pos);
        self.ticks_in_state = self.ticks_in_state.saturating_add(1);
        let killed = hit && self.kill();

        match self.state {
            SpiderState::Walk => self.walk(),
            SpiderState::Dead => {
                if let Some(remains) = &mut self.remains {
                    for half in [&mut remains.left_half, &mut remains.right_half] {
                        half.apply_gravity();
                        half.integrate(damping);
                    }
                }
            }
            SpiderState::Idle => {}
        }
        killed
    }

    /// Switch to the dead state and split into two halves. Returns false if
    /// the spider was already dead.
    pub fn kill(&mut self) -> bool {
        if self.state == SpiderState::Dead {
            return false;
        }
        self.state = SpiderState::Dead;
        self.ticks_in_state = 0;
        self.remains = Some(SpiderRemains {
            left_half: self.spawn_half(-1.0),
            right_half: self.spawn_half(1.0),
        });
        log::info!("spider cut at ({:.1}, {:.1})", self.pos.x, self.pos.y);
        true
    }

    /// `side` is -1 for the left half, 1 for the right
    fn spawn_half(&self, side: f32) -> RigidBody {
        let (ox, oy) = SPIDER_HALF_OFFSET;
        let (vx, vy) = SPIDER_HALF_VELOCITY;
        let mut half = self.half_template.clone();
        half.pos = self.pos + Vec2::new(side * ox, oy);
        half.vel = Vec2::new(side * vx, vy);
        half.angular_vel = -side * SPIDER_HALF_SPIN;
        half
    }

    fn walk(&mut self) {
        self.pos.x += self.direction.sign() * SPIDER_SPEED;
        let turn = if self.pos.x <= SPIDER_MIN_X {
            Some(Direction::Right)
        } else if self.pos.x >= SPIDER_MAX_X {
            Some(Direction::Left)
        } else {
            None
        };
        if let Some(direction) = turn.filter(|&d| d != self.direction) {
            log::debug!("spider turns {:?} at x={:.1}", direction, self.pos.x);
            self.direction = direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spider_at(x: f32) -> Spider {
        Spider::new(Vec2::new(x, 0.0)).unwrap()
    }

    #[test]
    fn test_walks_left() {
        let mut spider = spider_at(1000.0);
        assert!(!spider.update(false, AIR_FRICTION));
        assert_eq!(spider.pos.x, 998.0);
        assert_eq!(spider.ticks_in_state, 1);
        // Hitbox is taken from the position at the start of the tick
        assert_eq!(spider.hitbox.min.x, 935.0);
    }

    #[test]
    fn test_reverses_at_bounds() {
        let mut spider = spider_at(SPIDER_MIN_X + 2.0);
        spider.update(false, AIR_FRICTION);
        assert_eq!(spider.direction, Direction::Right);
        spider.update(false, AIR_FRICTION);
        assert_eq!(spider.pos.x, SPIDER_MIN_X + 2.0);

        let mut spider = spider_at(SPIDER_MAX_X - 2.0);
        spider.direction = Direction::Right;
        spider.update(false, AIR_FRICTION);
        assert_eq!(spider.direction, Direction::Left);
    }

    #[test]
    fn test_patrol_stays_in_bounds() {
        let mut spider = spider_at(1000.0);
        for _ in 0..5000 {
            spider.update(false, AIR_FRICTION);
            assert!(spider.pos.x >= SPIDER_MIN_X - SPIDER_SPEED);
            assert!(spider.pos.x <= SPIDER_MAX_X + SPIDER_SPEED);
        }
        assert_eq!(spider.state, SpiderState::Walk);
    }

    #[test]
    fn test_hit_kills_and_splits() {
        let mut spider = spider_at(500.0);
        spider.ticks_in_state = 40;
        assert!(spider.update(true, AIR_FRICTION));
        assert_eq!(spider.state, SpiderState::Dead);
        assert_eq!(spider.ticks_in_state, 0);
        // Dead spiders stay put
        assert_eq!(spider.pos.x, 500.0);

        let remains = spider.remains.as_ref().unwrap();
        let (left, right) = (&remains.left_half, &remains.right_half);
        // Halves already took their first integration step
        assert!(left.pos.x < 500.0 - 33.0);
        assert!(right.pos.x > 500.0 + 33.0);
        assert!(left.vel.x < 0.0 && right.vel.x > 0.0);
        assert_eq!(left.vel.x, -right.vel.x);
        assert_eq!(left.angular_vel, SPIDER_HALF_SPIN);
        assert_eq!(right.angular_vel, -SPIDER_HALF_SPIN);
    }

    #[test]
    fn test_kill_spawns_documented_halves() {
        let mut spider = spider_at(500.0);
        assert!(spider.kill());
        let remains = spider.remains.as_ref().unwrap();
        assert_eq!(remains.left_half.pos, Vec2::new(467.0, 110.0));
        assert_eq!(remains.right_half.pos, Vec2::new(533.0, 110.0));
        assert_eq!(remains.left_half.vel, Vec2::new(-4.0, 8.0));
        assert_eq!(remains.right_half.vel, Vec2::new(4.0, 8.0));
        assert_eq!(remains.left_half.mass(), SPIDER_HALF_MASS);
        assert!(remains.left_half.is_point_mass());
    }

    #[test]
    fn test_death_is_one_way() {
        let mut spider = spider_at(500.0);
        spider.update(true, AIR_FRICTION);
        let first = spider.remains.clone().unwrap();
        for _ in 0..300 {
            assert!(!spider.update(true, AIR_FRICTION));
            assert_eq!(spider.state, SpiderState::Dead);
        }
        assert!(!spider.kill());
        assert_eq!(spider.ticks_in_state, 300);
        // Halves kept falling instead of respawning
        let now = spider.remains.as_ref().unwrap();
        assert!(now.left_half.pos.y < first.left_half.pos.y);
    }

    #[test]
    fn test_halves_fall() {
        let mut spider = spider_at(500.0);
        spider.kill();
        for _ in 0..200 {
            spider.update(false, AIR_FRICTION);
        }
        let remains = spider.remains.as_ref().unwrap();
        assert!(remains.left_half.vel.y < 0.0);
        assert!(remains.right_half.vel.y < 0.0);
    }
}
