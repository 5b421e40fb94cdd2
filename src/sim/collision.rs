//! Axis-aligned rectangle geometry and overlap tests
//!
//! Screen coordinates: `pos` is the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Obstacle;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict AABB intersection: rectangles that only share an edge do not
    /// overlap, and an empty rectangle overlaps nothing.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0
        {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Id of the first obstacle (in set order) overlapping `rect`
pub fn first_collision(rect: &Rect, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|obstacle| rect.overlaps(&obstacle.rect))
        .map(|obstacle| obstacle.id)
}
