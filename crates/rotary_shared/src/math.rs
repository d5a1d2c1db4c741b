//! Ring angle math.
//!
//! Angles are radians, measured clockwise from the top of the dial on a
//! screen whose y axis grows downward. A ring with `N = end - start + 1`
//! positions places tick `i` at `-2π·(i - start)/N` and is rotated by
//! `+2π·(v - start)/N` to bring value `v` back to the top.

use std::f32::consts::TAU;

/// 2D Vector - screen positions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
}

impl Vec2 {
    /// Creates a new Vec2
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Number of discrete positions on a ring spanning `start..=end`.
#[inline]
#[must_use]
pub const fn positions(start: u32, end: u32) -> u32 {
    end - start + 1
}

/// Placement angle of tick `index` on a ring spanning `start..=end`.
///
/// `start` sits at 0; larger indices run counter-clockwise.
#[inline]
#[must_use]
pub fn tick_angle(index: u32, start: u32, end: u32) -> f32 {
    -ring_rotation(index, start, end)
}

/// Rotation that brings the tick for `value` to the top of the dial.
///
/// Always in `[0, 2π)`. Callers guarantee `start <= value <= end`.
#[inline]
#[must_use]
pub fn ring_rotation(value: u32, start: u32, end: u32) -> f32 {
    TAU * value.saturating_sub(start) as f32 / positions(start, end) as f32
}

/// Screen point at `radius` from `center` along `angle`.
#[inline]
#[must_use]
pub fn polar(center: Vec2, radius: f32, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(center.x + radius * sin, center.y - radius * cos)
}
