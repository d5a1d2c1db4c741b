//! # ROTARY
//!
//! The host side of the rotary clock: configuration, logging, and the
//! surface that places the widget and drives its frames.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                        HOST SURFACE                           │
//! ├───────────────────────────────────────────────────────────────┤
//! │  frame timer ──> ClockWidget::update ──> render ──> Backend   │
//! │                        │                                      │
//! │                 1 Hz tick timer ──> TimeSnapshot ──> rings    │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: TOML configuration and validation
//! - `error`: host error types
//! - `host`: frame loop and presentation backends
//! - `logging`: tracing subscriber setup

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod host;
pub mod logging;

// Re-export the layers below
pub use rotary_shared as shared;
pub use rotary_ui as ui;

pub use config::ClockConfig;
pub use error::{ClockError, ClockResult};
pub use host::{Backend, HostSurface, TerminalCanvas};
