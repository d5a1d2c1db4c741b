//! UI rendering system.
//!
//! Widgets emit backend-neutral commands; the host decides how to draw them.

use rotary_shared::Vec2;

use crate::layout::Rect;
use crate::style::Color;

/// A render command for the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
    },
    /// Text centered on a point.
    Text {
        /// Text content.
        text: String,
        /// Center of the text box.
        center: Vec2,
        /// Rotation of the text box around its center (radians, clockwise).
        rotation: f32,
        /// Text color.
        color: Color,
        /// Box fill behind the text.
        background: Color,
        /// Font size.
        font_size: f32,
    },
}

/// A batch of render commands with the same state.
#[derive(Debug, Clone)]
pub struct UIBatch {
    /// Commands in this batch.
    pub commands: Vec<RenderCommand>,
    /// Z-index for sorting.
    pub z_index: i32,
}

impl UIBatch {
    /// Creates a new empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
            z_index: 0,
        }
    }
}

impl Default for UIBatch {
    fn default() -> Self {
        Self::new()
    }
}

/// UI renderer that collects and batches commands.
pub struct UIRenderer {
    /// All commands from the frame.
    commands: Vec<RenderCommand>,
    /// Final batches for rendering.
    batches: Vec<UIBatch>,
}

impl UIRenderer {
    /// Creates a new UI renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // Five rings of at most 60 labels, plus the year.
            commands: Vec::with_capacity(256),
            batches: Vec::with_capacity(4),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.commands.clear();
        self.batches.clear();
    }

    /// Adds a render command.
    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    /// Gives a widget direct access to the frame's command list.
    pub fn commands_mut(&mut self) -> &mut Vec<RenderCommand> {
        &mut self.commands
    }

    /// Ends the frame and returns batches for rendering.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        let batch = UIBatch {
            commands: std::mem::take(&mut self.commands),
            z_index: 0,
        };

        self.batches.clear();
        self.batches.push(batch);

        &self.batches
    }

}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_frame() {
        let mut renderer = UIRenderer::new();

        renderer.begin_frame();
        renderer.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 100.0, 50.0),
            color: Color::WHITE,
        });
        assert_eq!(renderer.commands_mut().len(), 1);

        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].commands.len(), 1);
    }

    #[test]
    fn test_begin_frame_discards_previous_commands() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();
        renderer.commands_mut().push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 0.0, 0.0),
            color: Color::BLACK,
        });

        renderer.begin_frame();
        assert!(renderer.commands_mut().is_empty());
    }
}
