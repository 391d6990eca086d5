//! Axis-aligned collision geometry
//!
//! Every entity's hitbox hangs from the same ground line (lane anchor plus
//! `FOOT_OFFSET`), so Player, Letter and Obstacle collide against a consistent
//! floor regardless of their heights.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FOOT_OFFSET;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Rectangle centered on `center_x` whose bottom edge sits on the ground
    /// line below `anchor_y`
    pub fn from_foot(center_x: f32, anchor_y: f32, width: f32, height: f32) -> Self {
        let foot = anchor_y + FOOT_OFFSET;
        Self {
            min: Vec2::new(center_x - width / 2.0, foot - height),
            max: Vec2::new(center_x + width / 2.0, foot),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Strict overlap: rectangles that only touch along an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_foot_sits_on_ground() {
        let r = Rect::from_foot(100.0, 400.0, 40.0, 60.0);
        assert_eq!(r.max.y, 400.0 + FOOT_OFFSET);
        assert_eq!(r.height(), 60.0);
        assert_eq!(r.width(), 40.0);
        assert_eq!(r.center().x, 100.0);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::from_foot(100.0, 400.0, 40.0, 60.0);
        let b = Rect::from_foot(120.0, 400.0, 40.0, 40.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_different_lanes_miss() {
        // Lanes 108 px apart at 720 px height
        let player = Rect::from_foot(200.0, 511.2, 40.0, 64.0);
        let letter = Rect::from_foot(200.0, 403.2, 48.0, 48.0);
        assert!(!player.overlaps(&letter));
    }
}
