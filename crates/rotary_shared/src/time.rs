//! Time components for the clock rings.
//!
//! Every tick starts from a [`TimeSource`]: the real local clock in
//! production, a [`FixedClock`] in tests and replays.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::constants::FALLBACK_MONTH_LENGTH;

/// Calendar fields of one instant, plus the length of its month.
///
/// Built fresh every tick and thrown away afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSnapshot {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-12.
    pub month: u32,
    /// Day of month, 1-`month_length`.
    pub day: u32,
    /// Hour, 0-23.
    pub hour: u32,
    /// Minute, 0-59.
    pub minute: u32,
    /// Second, 0-59.
    pub second: u32,
    /// Days in `month`.
    pub month_length: u32,
}

/// Source of "now" in local wall-clock time.
pub trait TimeSource {
    /// Returns the current local date and time.
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can keep one handle and give the
/// other to a widget.
#[derive(Clone, Debug)]
pub struct FixedClock {
    now: Rc<Cell<NaiveDateTime>>,
}

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    /// Moves the clock to `now`.
    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    /// Moves the clock forward by whole seconds.
    pub fn advance_secs(&self, secs: i64) {
        self.now.set(self.now.get() + Duration::seconds(secs));
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}

/// Splits `now` into the fields the rings display.
#[must_use]
pub fn snapshot(now: NaiveDateTime) -> TimeSnapshot {
    TimeSnapshot {
        year: now.year(),
        month: now.month(),
        day: now.day(),
        hour: now.hour(),
        minute: now.minute(),
        // Leap seconds are reported by chrono as 59 with a nanosecond
        // overflow, so second() never exceeds 59.
        second: now.second(),
        month_length: month_length(now),
    }
}

/// Number of days in the month containing `now`.
///
/// Falls back to [`FALLBACK_MONTH_LENGTH`] if the calendar has no answer.
#[must_use]
pub fn month_length(now: NaiveDateTime) -> u32 {
    let date = now.date();
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map_or_else(
            || {
                tracing::warn!(%date, "calendar has no month length, using fallback");
                FALLBACK_MONTH_LENGTH
            },
            |last| last.day(),
        )
}
