//! # Clock Constants
//!
//! Ring domains and units. These are baked into the widget; the day ring is
//! the only one whose upper bound moves.

use crate::time::TimeSnapshot;

/// Days reported when the calendar cannot answer how long a month is.
pub const FALLBACK_MONTH_LENGTH: u32 = 30;

/// Default period of the clock tick (milliseconds).
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Suffix appended to the year label ("2024年").
pub const YEAR_SUFFIX: &str = "年";

/// Number of rotating rings.
pub const RING_COUNT: usize = 5;

/// One of the rotating rings, ordered outermost first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RingKind {
    /// Seconds, 0-59.
    Second,
    /// Minutes, 0-59.
    Minute,
    /// Hours, 0-23.
    Hour,
    /// Day of month, 1-month length.
    Day,
    /// Month, 1-12.
    Month,
}

impl RingKind {
    /// All rings, outermost first. The index is the ring's inset step.
    pub const ALL: [Self; RING_COUNT] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::Month,
    ];

    /// Unit suffix shown after each tick number.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Second => "秒",
            Self::Minute => "分",
            Self::Hour => "时",
            Self::Day => "日",
            Self::Month => "月",
        }
    }

    /// How many offsets this ring is inset from the widget edge.
    #[must_use]
    pub const fn inset_steps(self) -> u32 {
        match self {
            Self::Second => 0,
            Self::Minute => 1,
            Self::Hour => 2,
            Self::Day => 3,
            Self::Month => 4,
        }
    }

    /// Inclusive value domain `(start, end)`.
    ///
    /// Only the day ring depends on `month_length`.
    #[must_use]
    pub const fn domain(self, month_length: u32) -> (u32, u32) {
        match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::Day => (1, month_length),
            Self::Month => (1, 12),
        }
    }

    /// Picks this ring's value out of a snapshot.
    #[must_use]
    pub const fn value(self, snapshot: &TimeSnapshot) -> u32 {
        match self {
            Self::Second => snapshot.second,
            Self::Minute => snapshot.minute,
            Self::Hour => snapshot.hour,
            Self::Day => snapshot.day,
            Self::Month => snapshot.month,
        }
    }
}
