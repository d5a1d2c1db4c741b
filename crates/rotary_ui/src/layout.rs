//! Layout primitives for placing the dial.

use rotary_shared::Vec2;

/// A rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a `width`×`height` rectangle centered on `center`.
    #[must_use]
    pub fn centered_at(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width * 0.5, center.y - height * 0.5, width, height)
    }

    /// Creates a `side`×`side` square centered on `center`.
    #[must_use]
    pub fn square(center: Vec2, side: f32) -> Self {
        Self::centered_at(center, side, side)
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// A `width`×`height` rectangle centered inside this one.
    #[must_use]
    pub fn center_child(&self, width: f32, height: f32) -> Self {
        Self::centered_at(self.center(), width, height)
    }
}
