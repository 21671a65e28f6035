//! Vector helpers and axis-aligned rectangles
//!
//! Vectors are plain `glam::Vec2` values. Every helper here returns a new
//! value, so no vector is ever mutated through a shared reference. `Rect`
//! owns its center/size and keeps the top-left `position` as a derived cache.

use glam::Vec2;
/// Zero-safe vector helpers on top of `Vec2`
pub trait VectorExt {
    /// Unit vector in the same direction; the zero vector maps to itself
    fn normalized(self) -> Vec2;
    /// Same direction with magnitude capped at `max`
    fn clamped(self, max: f32) -> Vec2;
}

impl VectorExt for Vec2 {
    #[inline]
    fn normalized(self) -> Vec2 {
        if self.x == 0.0 && self.y == 0.0 {
            return self;
        }
        self / self.length()
    }

    #[inline]
    fn clamped(self, max: f32) -> Vec2 {
        let magnitude = self.length().min(max);
        self.normalized() * magnitude
    }
}

/// Axis-aligned bounding box positioned by its center point
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    center: Vec2,
    size: Vec2,
    /// Top-left corner, always `center - size / 2`
    position: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        let size = size.max(Vec2::ZERO);
        Self {
            center,
            size,
            position: center - size / 2.0,
        }
    }

    /// Rect of `width` x `height` centered on `(x, y)`
    pub fn centered(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(width, height))
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.position.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.position.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.position.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Place the center at `(x, y)`
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.set_center(Vec2::new(x, y));
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.center = center;
        self.refresh_position();
    }

    /// Translate by `delta`
    pub fn translate(&mut self, delta: Vec2) {
        self.center += delta;
        self.refresh_position();
    }

    /// Change the size around a fixed center. Negative extents saturate to 0.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width.max(0.0), height.max(0.0));
        self.refresh_position();
    }

    /// Strict AABB intersection; touching edges do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// True if `other` lies strictly inside this rect
    pub fn contains(&self, other: &Rect) -> bool {
        other.left() > self.left()
            && other.top() > self.top()
            && other.right() < self.right()
            && other.bottom() < self.bottom()
    }

    fn refresh_position(&mut self) {
        self.position = self.center - self.size / 2.0;
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO)
    }
}

/// Playable area supplied by the host; may change between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArenaBounds {
    pub width: f32,
    pub height: f32,
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Clamp `center` so a box of `half` extents stays inside the arena.
    /// Saturates toward `half` when the arena is smaller than the box.
    pub fn clamp_center(&self, center: Vec2, half: Vec2) -> Vec2 {
        Vec2::new(
            center.x.min(self.width - half.x).max(half.x),
            center.y.min(self.height - half.y).max(half.y),
        )
    }
}
