//! A ring of tick labels that rotates as one rigid group.
//!
//! Labels get their placement angle once, when the ring is built. After that
//! the only moving part is the ring's single rotation value; every label is
//! drawn at `placement + rotation`.
//!
//! Rotations are angles, so a move always takes the shorter way round: going
//! from 59 to 00 sweeps one position forward, not a whole turn back. The
//! resting angle is folded back into `[0, 2π)` once a move completes.

use std::f32::consts::{FRAC_PI_2, TAU};

use rotary_shared::{polar, ring_rotation, tick_angle, Vec2};

use crate::animation::{Animation, Easing};
use crate::layout::Rect;
use crate::render::RenderCommand;
use crate::style::{ClockStyle, Color, LabelPalette};
use crate::widget::core::{FrameTime, Widget, WidgetId, WidgetState};

/// Discrete value domain of a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSpec {
    /// Suffix shown after each number.
    pub unit: &'static str,
    /// First value (inclusive).
    pub start: u32,
    /// Last value (inclusive).
    pub end: u32,
}

impl RingSpec {
    /// Creates a spec for `start..=end`.
    #[must_use]
    pub const fn new(unit: &'static str, start: u32, end: u32) -> Self {
        Self { unit, start, end }
    }

    /// Number of ticks on the ring.
    #[must_use]
    pub const fn positions(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Ring rotation that shows `value` at the top.
    #[must_use]
    pub fn rotation_for(&self, value: u32) -> f32 {
        ring_rotation(value, self.start, self.end)
    }
}

/// One static label on a ring.
#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    /// Value this label stands for.
    pub value: u32,
    /// Display text, e.g. "03秒".
    pub text: String,
    /// Placement angle relative to the ring.
    pub angle: f32,
    /// Label box fill.
    pub background: Color,
}

/// Renderable ring.
#[derive(Debug, Clone)]
pub struct RingView {
    state: WidgetState,
    spec: RingSpec,
    radius: f32,
    ticks: Vec<TickLabel>,
    rotation: Animation,
    style: ClockStyle,
}

impl RingView {
    /// Builds a ring of `spec.positions()` labels on a circle of `radius`
    /// around `center`, unrotated.
    #[must_use]
    pub fn new(
        id: WidgetId,
        spec: RingSpec,
        center: Vec2,
        radius: f32,
        style: ClockStyle,
        palette: &mut LabelPalette,
    ) -> Self {
        Self {
            state: WidgetState::new(id, Rect::square(center, radius * 2.0)),
            spec,
            radius,
            ticks: build_ticks(spec, palette),
            rotation: Animation::new(0.0, Easing::default()),
            style,
        }
    }

    /// Sets how rotation changes are animated.
    #[must_use]
    pub fn with_motion(mut self, easing: Easing, duration: f32) -> Self {
        self.rotation = Animation::new(self.rotation.value(), easing).with_duration(duration);
        self
    }

    /// Returns the value domain.
    #[must_use]
    pub const fn spec(&self) -> RingSpec {
        self.spec
    }

    /// Returns the outer radius.
    #[must_use]
    pub const fn radius(&self) -> f32 {
        self.radius
    }

    /// Returns the ring center.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.state.rect.center()
    }

    /// Returns the labels in value order.
    #[must_use]
    pub fn ticks(&self) -> &[TickLabel] {
        &self.ticks
    }

    /// Current (possibly mid-animation) rotation.
    #[must_use]
    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    /// Rotation the ring is heading toward, in `[0, 2π)`.
    #[must_use]
    pub fn target_rotation(&self) -> f32 {
        fold(self.rotation.target())
    }

    /// Returns true while the ring is still moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.rotation.is_complete()
    }

    /// Sets the group rotation immediately.
    pub fn set_rotation(&mut self, angle: f32) {
        self.rotation.set_immediate(angle);
        self.state.mark_dirty();
    }

    /// Animates the group rotation from its current value to `angle`,
    /// whichever way round is shorter.
    pub fn animate_to(&mut self, angle: f32) {
        let current = self.rotation.value();
        let turns = ((current - angle) / TAU).round();
        self.rotation.set_target(angle + turns * TAU);
        self.state.mark_dirty();
    }

    /// Animates so that `value` ends up at the top. Returns the target angle.
    pub fn animate_to_value(&mut self, value: u32) -> f32 {
        let angle = self.spec.rotation_for(value);
        self.animate_to(angle);
        angle
    }

    /// Moves the ring without touching its labels or rotation.
    pub fn set_center(&mut self, center: Vec2) {
        self.state.rect = Rect::square(center, self.radius * 2.0);
        self.state.mark_dirty();
    }

    /// Replaces the labels for a new last value, keeping the rotation.
    pub fn rebuild(&mut self, end: u32, palette: &mut LabelPalette) {
        self.spec.end = end;
        self.ticks = build_ticks(self.spec, palette);
        self.state.mark_dirty();
    }

    /// Screen center and clockwise angle of a label at the current rotation.
    #[must_use]
    pub fn label_position(&self, tick: &TickLabel) -> (Vec2, f32) {
        let angle = tick.angle + self.rotation.value();
        let distance = self.radius - self.style.label_width * 0.5;
        (polar(self.center(), distance, angle), angle)
    }

    /// The value whose label is currently closest to the top of the dial.
    #[must_use]
    pub fn value_at_top(&self) -> Option<u32> {
        let rotation = self.rotation.value();
        self.ticks
            .iter()
            .map(|tick| {
                let turn = (tick.angle + rotation).rem_euclid(TAU);
                (tick.value, turn.min(TAU - turn))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(value, _)| value)
    }
}

impl Widget for RingView {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, frame: &FrameTime) {
        if self.rotation.is_complete() {
            return;
        }
        self.rotation.update(frame.dt);
        if self.rotation.is_complete() {
            let rest = fold(self.rotation.value());
            self.rotation.set_immediate(rest);
        }
        self.state.mark_dirty();
    }

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.state.is_visible() {
            return;
        }
        for tick in &self.ticks {
            let (center, angle) = self.label_position(tick);
            commands.push(RenderCommand::Text {
                text: tick.text.clone(),
                center,
                // Labels read outward along the radius.
                rotation: angle - FRAC_PI_2,
                color: self.style.text,
                background: tick.background,
                font_size: self.style.font_size,
            });
        }
    }
}

/// Same angle, in `[0, 2π)`.
fn fold(angle: f32) -> f32 {
    let folded = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if folded >= TAU {
        0.0
    } else {
        folded
    }
}

fn build_ticks(spec: RingSpec, palette: &mut LabelPalette) -> Vec<TickLabel> {
    (spec.start..=spec.end)
        .map(|value| TickLabel {
            value,
            text: format!("{value:02}{}", spec.unit),
            angle: tick_angle(value, spec.start, spec.end),
            background: palette.next_background(),
        })
        .collect()
}
