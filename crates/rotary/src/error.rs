//! # Host Error Types
//!
//! The clock itself cannot fail; everything here comes from the outside
//! world: config files, the terminal.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while configuring or hosting the clock.
#[derive(Error, Debug)]
pub enum ClockError {
    /// Config file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema.
    #[error("invalid config syntax: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config values out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Frame could not be written to the output.
    #[error("failed to present frame: {0}")]
    Render(#[from] std::io::Error),
}

/// Result type for host operations.
pub type ClockResult<T> = Result<T, ClockError>;
