//! Axis-aligned hitboxes and the two hit tests the game needs
//!
//! Boxes are closed intervals: touching edges count as overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::state::{Knife, Spider};
use crate::consts::CUT_LETHAL_TICKS;

/// Non-negative rectangle size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    w: f32,
    h: f32,
}

impl Size {
    pub fn new(w: f32, h: f32) -> Result<Self, SimError> {
        if !w.is_finite() || !h.is_finite() {
            return Err(SimError::NonFinite("rectangle size"));
        }
        if w < 0.0 || h < 0.0 {
            return Err(SimError::NegativeSize { w, h });
        }
        Ok(Self { w, h })
    }

    pub fn w(&self) -> f32 {
        self.w
    }

    pub fn h(&self) -> f32 {
        self.h
    }
}

/// Axis-aligned rectangle anchored at its bottom-left corner (y-up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Result<Self, SimError> {
        Ok(Self::from_size(Vec2::new(x, y), Size::new(w, h)?))
    }

    pub fn from_size(min: Vec2, size: Size) -> Self {
        Self { min, size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn max(&self) -> Vec2 {
        self.min + Vec2::new(self.size.w, self.size.h)
    }

    /// Closed-interval overlap test
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x <= b_max.x
            && other.min.x <= a_max.x
            && self.min.y <= b_max.y
            && other.min.y <= a_max.y
    }
}

/// A hitbox shape attached to an anchor point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitboxShape {
    offset: Vec2,
    size: Size,
}

impl HitboxShape {
    /// Build from an `(x offset, y offset, w, h)` tuple
    pub fn new((dx, dy, w, h): (f32, f32, f32, f32)) -> Result<Self, SimError> {
        Ok(Self {
            offset: Vec2::new(dx, dy),
            size: Size::new(w, h)?,
        })
    }

    /// Place the shape relative to `anchor`
    pub fn at(&self, anchor: Vec2) -> Rect {
        Rect::from_size(anchor + self.offset, self.size)
    }
}

/// The knife hits the spider only for a few ticks right after a recognized cut
pub fn knife_hits_spider(knife: &Knife, spider: &Spider) -> bool {
    if knife.ticks_since_cut >= CUT_LETHAL_TICKS {
        return false;
    }
    knife
        .cut_hitbox
        .is_some_and(|cut| cut.intersects(&spider.hitbox))
}

/// A live spider kills the butterfly on contact; a dead one never does
pub fn spider_hits_butterfly(spider: &Spider, butterfly_hitbox: &Rect) -> bool {
    spider.is_alive() && spider.hitbox.intersects(butterfly_hitbox)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(x, y, w, h).unwrap()
    }

    #[test]
    fn test_rect_rejects_negative_size() {
        assert_eq!(
            Rect::new(0.0, 0.0, -1.0, 5.0),
            Err(SimError::NegativeSize { w: -1.0, h: 5.0 })
        );
        assert!(Rect::new(0.0, 0.0, 5.0, -0.5).is_err());
        assert!(Rect::new(0.0, 0.0, f32::INFINITY, 1.0).is_err());
        assert!(HitboxShape::new((0.0, 0.0, 10.0, -10.0)).is_err());
    }

    #[test]
    fn test_rect_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(a.intersects(&rect(2.0, 2.0, 1.0, 1.0)));
        assert!(!a.intersects(&rect(11.0, 0.0, 5.0, 5.0)));
        assert!(!a.intersects(&rect(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(a.intersects(&rect(0.0, 10.0, 5.0, 5.0)));
        assert!(a.intersects(&rect(10.0, 10.0, 1.0, 1.0)));
        // Zero-size box on the border still counts
        assert!(a.intersects(&rect(10.0, 3.0, 0.0, 0.0)));
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = rect(-5.0, 3.0, 8.0, 2.0);
        let b = rect(2.0, 4.0, 10.0, 10.0);
        assert_eq!(a.intersects(&b), b.intersects(&a));
    }

    #[test]
    fn test_hitbox_shape_at_anchor() {
        let shape = HitboxShape::new((-65.0, 60.0, 130.0, 100.0)).unwrap();
        let r = shape.at(Vec2::new(1000.0, 0.0));
        assert_eq!(r.min, Vec2::new(935.0, 60.0));
        assert_eq!(r.max(), Vec2::new(1065.0, 160.0));
    }

    #[test]
    fn test_knife_needs_recent_cut() {
        let mut knife = Knife::new(Vec2::new(640.0, 260.0), 270.0).unwrap();
        let spider = Spider::new(Vec2::new(640.0, 0.0)).unwrap();
        // No cut hitbox yet
        knife.ticks_since_cut = 0;
        assert!(!knife_hits_spider(&knife, &spider));

        knife.cut_hitbox = Some(spider.hitbox);
        for ticks in 0..CUT_LETHAL_TICKS {
            knife.ticks_since_cut = ticks;
            assert!(knife_hits_spider(&knife, &spider));
        }
        knife.ticks_since_cut = CUT_LETHAL_TICKS;
        assert!(!knife_hits_spider(&knife, &spider));
    }

    #[test]
    fn test_dead_spider_is_harmless() {
        let mut spider = Spider::new(Vec2::new(640.0, 0.0)).unwrap();
        let on_top = spider.hitbox;
        assert!(spider_hits_butterfly(&spider, &on_top));
        assert!(spider.kill());
        assert!(!spider_hits_butterfly(&spider, &on_top));
    }
}
