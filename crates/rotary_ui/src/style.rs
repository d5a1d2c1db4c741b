//! Styling for the clock face.
//!
//! White labels on black, small type. Styling is static configuration; the
//! only variation is the per-label background, drawn from a seeded RNG and
//! fully transparent unless a style asks for opacity.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// True when nothing would be drawn.
    #[must_use]
    pub fn is_transparent(self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Fixed look of the clock.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockStyle {
    /// Label text color.
    pub text: Color,
    /// Surface color behind the widget.
    pub background: Color,
    /// Font size (px).
    pub font_size: f32,
    /// Radial extent of a tick label box (px), measured in from the ring edge.
    pub label_width: f32,
    /// Tangential extent of a tick label box (px).
    pub label_height: f32,
    /// Year label box `(width, height)` (px).
    pub year_label_size: (f32, f32),
    /// Opacity of the random label backgrounds.
    pub label_background_alpha: f32,
}

impl ClockStyle {
    /// White on black, 10px type, 30px label boxes, invisible backgrounds.
    pub const DEFAULT: Self = Self {
        text: Color::WHITE,
        background: Color::BLACK,
        font_size: 10.0,
        label_width: 30.0,
        label_height: 30.0,
        year_label_size: (100.0, 50.0),
        label_background_alpha: 0.0,
    };
}

impl Default for ClockStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Deterministic source of label background colors.
#[derive(Debug, Clone)]
pub struct LabelPalette {
    rng: StdRng,
    alpha: f32,
}

impl LabelPalette {
    /// Creates a palette from a seed; every color gets `alpha`.
    #[must_use]
    pub fn new(seed: u64, alpha: f32) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            alpha,
        }
    }

    /// Next random background color.
    pub fn next_background(&mut self) -> Color {
        Color::rgba(
            self.rng.gen_range(0.0..=1.0),
            self.rng.gen_range(0.0..=1.0),
            self.rng.gen_range(0.0..=1.0),
            self.alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_deterministic() {
        let mut a = LabelPalette::new(7, 0.0);
        let mut b = LabelPalette::new(7, 0.0);
        for _ in 0..10 {
            assert_eq!(a.next_background(), b.next_background());
        }
    }

    #[test]
    fn test_default_backgrounds_are_invisible() {
        let mut palette = LabelPalette::new(1, ClockStyle::DEFAULT.label_background_alpha);
        let color = palette.next_background();
        assert!(color.is_transparent());
        assert!((0.0..=1.0).contains(&color.r));
    }
}
