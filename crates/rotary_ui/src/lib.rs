//! # ROTARY UI System
//!
//! The rotary clock widget and the small retained-mode toolkit it sits on.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                        UI PIPELINE                          │
//! ├────────────────────────────────────────────────────────────┤
//! │  PeriodicTimer → ClockWidget → RingView rotations → Render │
//! │        ↓               ↓               ↓              ↓    │
//! │   1 Hz ticks     TimeSnapshot    Spring easing    Commands │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs on the host's thread. The only clock read happens in
//! the widget's tick handler through its [`rotary_shared::TimeSource`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod layout;
pub mod render;
pub mod style;
pub mod timer;
pub mod widget;

pub use animation::{Animation, Easing};
pub use layout::Rect;
pub use render::{RenderCommand, UIBatch, UIRenderer};
pub use style::{ClockStyle, Color, LabelPalette};
pub use timer::PeriodicTimer;
pub use widget::{
    ClockOptions, ClockWidget, FrameTime, Lifecycle, RingSpec, RingView, TickLabel, Widget,
    WidgetId, WidgetState, YearLabel,
};
