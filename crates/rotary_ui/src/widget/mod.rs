//! Widget system for UI components.
//!
//! The clock is a root widget owning five rings and a year label.

mod clock;
mod core;
mod label;
mod ring;

pub use clock::{ClockOptions, ClockWidget, Lifecycle};
pub use self::core::{FrameTime, Widget, WidgetFlags, WidgetId, WidgetState};
pub use label::YearLabel;
pub use ring::{RingSpec, RingView, TickLabel};
