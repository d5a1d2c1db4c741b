//! The year label in the middle of the dial.

use rotary_shared::{Vec2, YEAR_SUFFIX};

use crate::layout::Rect;
use crate::render::RenderCommand;
use crate::style::{ClockStyle, Color};
use crate::widget::core::{FrameTime, Widget, WidgetId, WidgetState};

/// Centered text label whose content is replaced, never animated.
#[derive(Debug, Clone)]
pub struct YearLabel {
    state: WidgetState,
    text: String,
    background: Color,
    style: ClockStyle,
}

impl YearLabel {
    /// Creates an empty label centered on `center`.
    #[must_use]
    pub fn new(id: WidgetId, center: Vec2, style: ClockStyle, background: Color) -> Self {
        let (width, height) = style.year_label_size;
        Self {
            state: WidgetState::new(id, Rect::centered_at(center, width, height)),
            text: String::new(),
            background,
            style,
        }
    }

    /// Returns the current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Shows `year`, e.g. "2024年".
    pub fn set_year(&mut self, year: i32) {
        let text = format!("{year}{YEAR_SUFFIX}");
        if text != self.text {
            self.text = text;
            self.state.mark_dirty();
        }
    }

    /// Moves the label.
    pub fn set_center(&mut self, center: Vec2) {
        let (width, height) = self.style.year_label_size;
        self.state.rect = Rect::centered_at(center, width, height);
        self.state.mark_dirty();
    }
}

impl Widget for YearLabel {
    fn state(&self) -> &WidgetState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut WidgetState {
        &mut self.state
    }

    fn update(&mut self, _frame: &FrameTime) {}

    fn render(&self, commands: &mut Vec<RenderCommand>) {
        if !self.state.is_visible() || self.text.is_empty() {
            return;
        }
        commands.push(RenderCommand::Text {
            text: self.text.clone(),
            center: self.state.rect.center(),
            rotation: 0.0,
            color: self.style.text,
            background: self.background,
            font_size: self.style.font_size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_text_is_replaced() {
        let mut label = YearLabel::new(
            WidgetId::new(9),
            Vec2::new(50.0, 50.0),
            ClockStyle::DEFAULT,
            Color::TRANSPARENT,
        );
        let mut commands = Vec::new();
        label.render(&mut commands);
        assert!(commands.is_empty());

        label.set_year(2024);
        assert_eq!(label.text(), "2024年");
        label.set_year(2025);
        assert_eq!(label.text(), "2025年");

        label.render(&mut commands);
        assert_eq!(commands.len(), 1);
        assert_eq!(label.state().rect, Rect::new(0.0, 25.0, 100.0, 50.0));
    }
}
