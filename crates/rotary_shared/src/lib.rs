//! # ROTARY Shared
//!
//! The part of the rotary clock with actual design substance:
//! how a point in time becomes ring values, and how a ring value becomes
//! an angle.
//!
//! ```text
//! TimeSource::now() ──> TimeSnapshot ──> ring value ──> ring_rotation()
//!                          │
//!                          └─> month_length (day ring domain)
//! ```
//!
//! ## CRITICAL RULE
//!
//! Nothing here touches rendering or timers. Every function is pure except
//! [`SystemClock`], which reads the local wall clock.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod constants;
pub mod math;
pub mod time;

pub use constants::{
    RingKind, FALLBACK_MONTH_LENGTH, RING_COUNT, TICK_INTERVAL_MS, YEAR_SUFFIX,
};
pub use math::{polar, ring_rotation, tick_angle, Vec2};
pub use time::{month_length, snapshot, FixedClock, SystemClock, TimeSnapshot, TimeSource};
