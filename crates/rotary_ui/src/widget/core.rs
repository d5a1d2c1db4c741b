//! Core widget types and traits.

use std::time::Instant;

use crate::layout::Rect;
use crate::render::RenderCommand;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Widget state flags (bitfield).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget needs redraw.
    pub const DIRTY_RENDER: u32 = 1 << 1;

    /// Default flags for a new widget.
    pub const DEFAULT: Self = Self(Self::VISIBLE | Self::DIRTY_RENDER);

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }
}

/// Common widget state.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Bounding rectangle (set by the parent or the host).
    pub rect: Rect,
    /// State flags.
    pub flags: WidgetFlags,
}

impl WidgetState {
    /// Creates a new widget state.
    #[must_use]
    pub fn new(id: WidgetId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            flags: WidgetFlags::DEFAULT,
        }
    }

    /// Returns true if the widget is visible.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE)
    }

    /// Returns true if the widget changed since it was last drawn.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.flags.has(WidgetFlags::DIRTY_RENDER)
    }

    /// Marks the widget as needing redraw.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.flags.set(WidgetFlags::DIRTY_RENDER);
    }

    /// Marks the widget as drawn.
    #[inline]
    pub fn mark_clean(&mut self) {
        self.flags.clear(WidgetFlags::DIRTY_RENDER);
    }
}

/// Timing of the frame being processed.
#[derive(Debug, Clone, Copy)]
pub struct FrameTime {
    /// Monotonic time at the start of the frame.
    pub now: Instant,
    /// Seconds since the previous frame.
    pub dt: f32,
}

/// Base trait for all widgets.
pub trait Widget {
    /// Returns the widget's state.
    fn state(&self) -> &WidgetState;

    /// Returns mutable access to the widget's state.
    fn state_mut(&mut self) -> &mut WidgetState;

    /// Advances timers and animations by one frame.
    fn update(&mut self, frame: &FrameTime);

    /// Generates render commands for this widget.
    fn render(&self, commands: &mut Vec<RenderCommand>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let mut state = WidgetState::new(WidgetId::new(3), Rect::new(0.0, 0.0, 0.0, 0.0));
        assert!(state.is_visible());
        assert!(state.is_dirty());

        state.mark_clean();
        assert!(!state.is_dirty());
        state.mark_dirty();
        assert!(state.is_dirty());
        assert_eq!(state.id.raw(), 3);
    }
}
