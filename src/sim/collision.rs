//! Axis-aligned collision detection
//!
//! Detection only: the tick loop decides what a hit means (remove the
//! bullet, reset the player, change phase) after the scan, so a roster is
//! never mutated while it is being iterated. Entity counts are small enough
//! that brute-force pairwise checks suffice; there is no broad phase.

use glam::Vec2;

/// Axis-aligned rectangle: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            w: size.x,
            h: size.y,
        }
    }

    /// Strict interval overlap on both axes. Rectangles that merely share
    /// an edge do not overlap, and degenerate (zero-size) rectangles never
    /// intersect anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.w <= 0.0 || self.h <= 0.0 || other.w <= 0.0 || other.h <= 0.0 {
            return false;
        }
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

/// Anything that takes part in collision checks.
pub trait Collidable {
    /// The rectangle used for collision testing this frame.
    fn hitbox(&self) -> Rect;

    /// Pairwise self-test against another collidable.
    fn hits(&self, other: &dyn Collidable) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}
